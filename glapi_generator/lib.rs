////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! A GL dispatch layer generator. It reads a `gl_API.xml` description into a `Registry` and
//! writes the C/C++ fragments of a binding that dispatches every GL call through a
//! substitutable "current interface":
//!
//! - `ForwardGenerator`: `forward_<ep>` definitions calling `current_GL_Interface()`
//! - `ForwardTableGenerator`: a `{"gl<ep>", &forward_<ep>}` lookup table
//! - `ProcPtrGenerator`: function pointer variable declarations
//! - `ProcInitGenerator`: `getProcAddress` assignments for those variables
//! - `InlineForwardGenerator`: inline wrappers over the current interface
//!
//! # Example
//!
//! ```no_run
//! use glapi_generator::{EnabledProcs, Naming, ProcPtrGenerator, Registry};
//! use std::fs::File;
//!
//! let registry = Registry::from_env().unwrap();
//! let procs = EnabledProcs::load("enabled_procs.txt").unwrap();
//! let mut file = File::create("gl_p_proc.inc").unwrap();
//!
//! registry
//!     .write_bindings(ProcPtrGenerator::new(procs, Naming::GlPrefixed), &mut file)
//!     .unwrap();
//! ```
//!
//! Declarations, pointer types and call sites all render parameters through
//! `generators::gen_parameters`, so padding parameters appear in every signature and in no
//! argument list.

#[macro_use]
extern crate log;

pub mod error;
pub mod generators;
pub mod procs;
mod registry;

pub use error::{FormatError, LoadError};
pub use generators::{
    forward_gen::ForwardGenerator,
    forward_table_gen::ForwardTableGenerator,
    inline_forward_gen::{InlineForwardGenerator, InlineOptions},
    proc_init_gen::ProcInitGenerator,
    proc_ptr_gen::ProcPtrGenerator,
    DebugPrints, Generator, Naming,
};
pub use procs::{AllProcs, EnabledProcs, ProcPolicy};

pub use registry::*;
