////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Selection of the entry points a build exposes.

use std::{collections::HashSet, fs, path::Path};

use crate::error::LoadError;

/// Decides whether an entry point is part of the generated surface.
///
/// Unknown names are simply not enabled; a policy never fails.
pub trait ProcPolicy {
    fn is_enabled(&self, entry_point: &str) -> bool;
}

/// Enables every entry point.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllProcs;

impl ProcPolicy for AllProcs {
    fn is_enabled(&self, _: &str) -> bool {
        true
    }
}

/// An allow-list of entry point names, matched literally (no `gl` prefix).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnabledProcs {
    names: HashSet<String>,
}

impl EnabledProcs {
    pub fn from_names<I, S>(names: I) -> EnabledProcs
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnabledProcs {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads an allow-list file: one name per line, `#` starts a comment.
    pub fn load<P>(path: P) -> Result<EnabledProcs, LoadError>
    where P: AsRef<Path> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let procs = EnabledProcs::parse(&text);
        debug!("{} enabled procs listed in {}", procs.names.len(), path.display());
        Ok(procs)
    }

    pub fn parse(text: &str) -> EnabledProcs {
        EnabledProcs::from_names(
            text.lines()
                .map(|line| line.split('#').next().unwrap_or("").trim())
                .filter(|name| !name.is_empty()),
        )
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ProcPolicy for EnabledProcs {
    fn is_enabled(&self, entry_point: &str) -> bool {
        self.names.contains(entry_point)
    }
}

impl<P> ProcPolicy for Box<P>
where P: ProcPolicy + ?Sized
{
    fn is_enabled(&self, entry_point: &str) -> bool {
        (**self).is_enabled(entry_point)
    }
}

impl<P> ProcPolicy for &P
where P: ProcPolicy + ?Sized
{
    fn is_enabled(&self, entry_point: &str) -> bool {
        (**self).is_enabled(entry_point)
    }
}
