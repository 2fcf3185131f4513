////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use super::gen_symbol_name;
use crate::{error::FormatError, registry::Registry};

/// Writes one `{"gl<ep>", (void*) &forward_<ep>},` record per desktop entry point, pairing
/// each symbol with the forwarder written by `ForwardGenerator`.
///
/// Records are not deduplicated; `Registry` already rejects repeated entry point names.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardTableGenerator;

impl super::Generator for ForwardTableGenerator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        for (_, ep) in registry.desktop_entry_points() {
            writeln!(dest, "{{\"{symbol}\", (void*) &forward_{ep}}},", symbol = gen_symbol_name(ep), ep = ep)?;
        }

        Ok(())
    }
}
