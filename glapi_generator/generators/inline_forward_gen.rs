////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use super::{gen_call_arguments, gen_declaration_list, Naming};
use crate::{
    error::FormatError,
    procs::{AllProcs, ProcPolicy},
    registry::{Function, Registry},
};

/// Shape of the generated inline wrappers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InlineOptions {
    /// Fetch the interface once through `getCurrentInterface()` and assert
    /// `!iface->hasError()` after the call. Otherwise the call goes straight through
    /// `GL_Interface::getCurrent()` after asserting that the method pointer is loaded.
    pub error_assertion: bool,
    /// Spelling of the interface member that is called.
    pub accessor_naming: Naming,
    /// Spelling of the generated wrapper function.
    pub function_naming: Naming,
}

impl InlineOptions {
    /// `Clear(mask)` calling `iface->Clear(mask)` and checking `iface->hasError()`.
    pub fn checked() -> InlineOptions {
        InlineOptions {
            error_assertion: true,
            accessor_naming: Naming::Bare,
            function_naming: Naming::Bare,
        }
    }

    /// `Clear(mask)` returning `GL_Interface::getCurrent()->glClear(mask)` directly.
    pub fn direct() -> InlineOptions {
        InlineOptions {
            error_assertion: false,
            accessor_naming: Naming::GlPrefixed,
            function_naming: Naming::Bare,
        }
    }
}

impl Default for InlineOptions {
    fn default() -> InlineOptions {
        InlineOptions::checked()
    }
}

/// Writes an inline wrapper per enabled desktop entry point that forwards to the current
/// GL interface.
#[derive(Clone, Debug, Default)]
pub struct InlineForwardGenerator<P = AllProcs> {
    pub procs: P,
    pub options: InlineOptions,
}

impl<P> InlineForwardGenerator<P>
where P: ProcPolicy
{
    pub fn new(procs: P, options: InlineOptions) -> InlineForwardGenerator<P> {
        InlineForwardGenerator { procs, options }
    }

    fn write_checked<W>(&self, func: &Function, ep: &str, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        let params = func.params(ep)?;

        writeln!(
            dest,
            "inline {} {}({})",
            func.return_type,
            self.options.function_naming.apply(ep),
            gen_declaration_list(params)
        )?;
        writeln!(dest, "{{")?;
        writeln!(dest, "  auto iface = getCurrentInterface();")?;
        writeln!(
            dest,
            "  {assign}iface->{name}({args});",
            assign = if func.returns_value() { "auto ret = " } else { "" },
            name = self.options.accessor_naming.apply(ep),
            args = gen_call_arguments(params)
        )?;
        writeln!(dest, "  assert(!iface->hasError());")?;
        if func.returns_value() {
            writeln!(dest, "  return ret;")?;
        }
        writeln!(dest, "}}")?;
        writeln!(dest)?;

        Ok(())
    }

    fn write_direct<W>(&self, func: &Function, ep: &str, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        let params = func.params(ep)?;
        let accessor = format!("GL_Interface::getCurrent()->{}", self.options.accessor_naming.apply(ep));

        writeln!(
            dest,
            "inline {} {}({}) {{",
            func.return_type,
            self.options.function_naming.apply(ep),
            gen_declaration_list(params)
        )?;
        writeln!(dest, "  assert({});", accessor)?;
        writeln!(
            dest,
            "  {ret}{accessor}({args});",
            ret = if func.returns_value() { "return " } else { "" },
            accessor = accessor,
            args = gen_call_arguments(params)
        )?;
        writeln!(dest, "}}")?;

        Ok(())
    }
}

impl<P> super::Generator for InlineForwardGenerator<P>
where P: ProcPolicy
{
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write {
        for (func, ep) in registry.desktop_entry_points() {
            if !self.procs.is_enabled(ep) {
                trace!("{} is not enabled", ep);
                continue;
            }

            if self.options.error_assertion {
                self.write_checked(func, ep, dest)?;
            } else {
                self.write_direct(func, ep, dest)?;
            }
        }

        Ok(())
    }
}
