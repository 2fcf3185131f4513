////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::io;

use crate::{
    error::FormatError,
    registry::{Param, Registry},
};

pub mod forward_gen;
pub mod forward_table_gen;
pub mod inline_forward_gen;
pub mod proc_init_gen;
pub mod proc_ptr_gen;

/// Trait for a bindings generator.
///
/// A generator makes one deterministic pass over the registry and writes one artifact.
pub trait Generator {
    /// Writes the artifact for `registry` to `dest`.
    fn write<W>(&self, registry: &Registry, dest: &mut W) -> Result<(), FormatError>
    where W: io::Write;
}

/// How an entry point is spelled where it names a variable, method or function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Naming {
    /// `glClear`
    GlPrefixed,
    /// `Clear`
    Bare,
}

impl Default for Naming {
    fn default() -> Naming {
        Naming::GlPrefixed
    }
}

impl Naming {
    pub fn apply(self, entry_point: &str) -> String {
        match self {
            Naming::GlPrefixed => gen_symbol_name(entry_point),
            Naming::Bare => entry_point.to_owned(),
        }
    }
}

/// Call tracing inserted into generated forwarders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugPrints {
    None,
    FunctionCalls,
}

impl Default for DebugPrints {
    fn default() -> DebugPrints {
        DebugPrints::None
    }
}

/// The textual forms a parameter list is rendered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamForm {
    /// `GLint x`, padding included.
    Declaration,
    /// `GLint`, padding included.
    TypeOnly,
    /// `x`, padding excluded.
    CallArgument,
}

/// Renders every parameter of `params` in `form`, one string per parameter.
pub fn gen_parameters(params: &[Param], form: ParamForm) -> Vec<String> {
    params
        .iter()
        .filter(|p| form != ParamForm::CallArgument || !p.is_padding)
        .map(|p| match form {
            ParamForm::Declaration => format!("{} {}", p.ty, p.name),
            ParamForm::TypeOnly => p.ty.clone(),
            ParamForm::CallArgument => p.name.clone(),
        })
        .collect()
}

/// `GLenum mode, GLint pad` for use inside a declaration's parentheses.
pub fn gen_declaration_list(params: &[Param]) -> String {
    gen_parameters(params, ParamForm::Declaration).join(", ")
}

/// `GLenum, GLint` for use inside a function pointer type.
pub fn gen_type_list(params: &[Param]) -> String {
    gen_parameters(params, ParamForm::TypeOnly).join(", ")
}

/// `mode` for use at a call site; padding parameters are left out.
pub fn gen_call_arguments(params: &[Param]) -> String {
    gen_parameters(params, ParamForm::CallArgument).join(", ")
}

/// Generates the native symbol name of an entry point.
///
/// Example results: `"glClear"`, `"glBlendEquationEXT"`.
pub fn gen_symbol_name(entry_point: &str) -> String {
    format!("gl{}", entry_point)
}

/// The function pointer type of an entry point, e.g. `void GLAPIENTRY (*) (GLbitfield)`.
pub fn gen_fn_ptr_type(return_type: &str, params: &[Param]) -> String {
    format!("{} GLAPIENTRY (*) ({})", return_type, gen_type_list(params))
}
