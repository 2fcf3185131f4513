////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use super::{gen_call_arguments, gen_declaration_list, gen_symbol_name, DebugPrints};
use crate::{error::FormatError, registry::Registry};

/// Writes a `forward_<ep>` definition per desktop entry point that dispatches through
/// `current_GL_Interface()`.
///
/// Calls without a return value are dropped while `discard_gl_calls` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardGenerator {
    pub debug_prints: DebugPrints,
}

impl super::Generator for ForwardGenerator {
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        for (func, ep) in registry.desktop_entry_points() {
            let params = func.params(ep)?;
            let call = format!(
                "current_GL_Interface()->{name}({args})",
                name = gen_symbol_name(ep),
                args = gen_call_arguments(params)
            );

            writeln!(
                dest,
                "static {ret} GLAPIENTRY forward_{ep}({params}) {{",
                ret = func.return_type,
                ep = ep,
                params = gen_declaration_list(params)
            )?;

            if let DebugPrints::FunctionCalls = self.debug_prints {
                writeln!(dest, "  std::cout << \"gl: {}\" << std::endl;", ep)?;
            }

            if func.returns_value() {
                writeln!(dest, "  return {};", call)?;
            } else {
                writeln!(dest, "  if (!discard_gl_calls)")?;
                writeln!(dest, "    {};", call)?;
            }

            writeln!(dest, "}}")?;
        }

        Ok(())
    }
}
