////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use super::{gen_type_list, Naming};
use crate::{
    error::FormatError,
    procs::{AllProcs, ProcPolicy},
    registry::Registry,
};

/// Declares a zero-initialized function pointer variable per enabled desktop entry point.
///
/// `ProcInitGenerator` with the same `naming` writes the matching assignments.
#[derive(Clone, Debug, Default)]
pub struct ProcPtrGenerator<P = AllProcs> {
    pub procs: P,
    pub naming: Naming,
}

impl<P> ProcPtrGenerator<P>
where P: ProcPolicy
{
    pub fn new(procs: P, naming: Naming) -> ProcPtrGenerator<P> {
        ProcPtrGenerator { procs, naming }
    }
}

impl<P> super::Generator for ProcPtrGenerator<P>
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
                "{ret} GLAPIENTRY (*{name}) ({types}) = 0;",
                ret = func.return_type,
                name = self.naming.apply(ep),
                types = gen_type_list(func.params(ep)?)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        procs::EnabledProcs,
        registry::{Function, Param},
    };

    fn registry() -> Registry {
        Registry::from_functions(vec![
            Function::new("Bitmap", "void", 8).with_entry_point(
                "Bitmap",
                vec![Param::new("width", "GLsizei"), Param::padding("pad", "GLint")],
            ),
            Function::new("IsEnabled", "GLboolean", 286).with_entry_point("IsEnabled", vec![Param::new("cap", "GLenum")]),
        ])
        .unwrap()
    }

    fn generate<P: ProcPolicy>(generator: ProcPtrGenerator<P>) -> String {
        let mut out = Vec::new();
        registry().write_bindings(generator, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn declares_every_pointer_with_padding_types() {
        assert_eq!(
            generate(ProcPtrGenerator::<AllProcs>::default()),
            "void GLAPIENTRY (*glBitmap) (GLsizei, GLint) = 0;
GLboolean GLAPIENTRY (*glIsEnabled) (GLenum) = 0;
"
        );
    }

    #[test]
    fn bare_naming() {
        assert_eq!(
            generate(ProcPtrGenerator::new(AllProcs, Naming::Bare)),
            "void GLAPIENTRY (*Bitmap) (GLsizei, GLint) = 0;
GLboolean GLAPIENTRY (*IsEnabled) (GLenum) = 0;
"
        );
    }

    #[test]
    fn only_enabled_entry_points_are_declared() {
        let procs = EnabledProcs::from_names(vec!["IsEnabled", "NotInTheApi"]);
        assert_eq!(
            generate(ProcPtrGenerator::new(&procs, Naming::GlPrefixed)),
            "GLboolean GLAPIENTRY (*glIsEnabled) (GLenum) = 0;\n"
        );
    }
}
