////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use super::{gen_fn_ptr_type, gen_symbol_name, Naming};
use crate::{
    error::FormatError,
    procs::{AllProcs, ProcPolicy},
    registry::Registry,
};

/// Writes an assignment per enabled desktop entry point that loads the pointer declared by
/// `ProcPtrGenerator` through `getProcAddress`.
///
/// The generated statements must only run once a GL context exists.
#[derive(Clone, Debug, Default)]
pub struct ProcInitGenerator<P = AllProcs> {
    pub procs: P,
    pub naming: Naming,
}

impl<P> ProcInitGenerator<P>
where P: ProcPolicy
{
    pub fn new(procs: P, naming: Naming) -> ProcInitGenerator<P> {
        ProcInitGenerator { procs, naming }
    }
}

impl<P> super::Generator for ProcInitGenerator<P>
where P: ProcPolicy
{
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        for (func, ep) in registry.desktop_entry_points() {
            if !self.procs.is_enabled(ep) {
                trace!("{} is not enabled", ep);
                continue;
            }

            writeln!(
                dest,
                "{name} = ({ty}) getProcAddress(\"{symbol}\");",
                name = self.naming.apply(ep),
                ty = gen_fn_ptr_type(&func.return_type, func.params(ep)?),
                symbol = gen_symbol_name(ep)
            )?;
        }

        Ok(())
    }
}
