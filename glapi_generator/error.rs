////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to turn an API description into a `Registry`.
///
/// Every variant is fatal: nothing is emitted once loading has failed.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed XML in {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: xml::reader::Error,
    },

    #[error("{}: {reason}", .path.display())]
    Schema { path: PathBuf, reason: String },

    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("entry point `{name}` is exposed by both `{first}` and `{second}`")]
    DuplicateEntryPoint {
        name: String,
        first: String,
        second: String,
    },

    #[error("function `{function}` has no entry points")]
    EmptyEntryPoints { function: String },

    #[error("include cycle through {}", .path.display())]
    IncludeCycle { path: PathBuf },
}

/// Failure while rendering a loaded `Registry`.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("function `{function}`: entry point `{entry_point}` has no parameter list")]
    MissingParameters { function: String, entry_point: String },

    #[error("function `{function}`: parameter `{param}` of entry point `{entry_point}` has no type")]
    EmptyType {
        function: String,
        entry_point: String,
        param: String,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
