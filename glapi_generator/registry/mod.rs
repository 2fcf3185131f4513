////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! The in-memory model of a GL API description.
//!
//! A `Registry` is built once, either by `Registry::load` from a `gl_API.xml` file or by
//! `Registry::from_functions`, and is read-only afterwards. Every generator walks it through
//! `functions_by_offset`, so all generated artifacts agree on ordering.

use std::{
    collections::{BTreeMap, HashMap},
    env, io,
    path::{Path, PathBuf},
    slice,
};

use crate::{
    error::{FormatError, LoadError},
    generators::Generator,
};

mod parse;

/// Environment variable naming the directory that holds the API description.
pub const GLAPI_PATH_VAR: &str = "GLAPI_PATH";

/// File name of the top-level API description inside `$GLAPI_PATH`.
pub const GLAPI_FILE: &str = "gl_API.xml";

/// One argument of a function as it appears for a specific entry point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// The C type spelling, e.g. `const GLfloat *`.
    pub ty: String,
    /// Present in declarations for ABI layout only, never passed at call sites.
    pub is_padding: bool,
}

impl Param {
    pub fn new<N, T>(name: N, ty: T) -> Param
    where
        N: Into<String>,
        T: Into<String>,
    {
        Param {
            name: name.into(),
            ty: ty.into(),
            is_padding: false,
        }
    }

    pub fn padding<N, T>(name: N, ty: T) -> Param
    where
        N: Into<String>,
        T: Into<String>,
    {
        Param {
            is_padding: true,
            ..Param::new(name, ty)
        }
    }
}

/// One semantic operation of the API together with every name it is exposed under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    /// Canonical name, without the `gl` prefix.
    pub name: String,
    pub return_type: String,
    /// False for functions that only exist in the ES profiles.
    pub desktop: bool,
    /// Dispatch offset, only used to order functions.
    pub offset: usize,
    /// Entry point names in description order. The canonical name is one of them.
    pub entry_points: Vec<String>,
    pub entry_point_params: BTreeMap<String, Vec<Param>>,
}

impl Function {
    /// Creates a desktop function without any entry points.
    pub fn new<N, R>(name: N, return_type: R, offset: usize) -> Function
    where
        N: Into<String>,
        R: Into<String>,
    {
        Function {
            name: name.into(),
            return_type: return_type.into(),
            desktop: true,
            offset,
            entry_points: Vec::new(),
            entry_point_params: BTreeMap::new(),
        }
    }

    pub fn with_entry_point<N>(mut self, name: N, params: Vec<Param>) -> Function
    where N: Into<String> {
        let name = name.into();
        self.entry_point_params.insert(name.clone(), params);
        self.entry_points.push(name);
        self
    }

    pub fn with_desktop(mut self, desktop: bool) -> Function {
        self.desktop = desktop;
        self
    }

    /// True unless the return type is `void`.
    pub fn returns_value(&self) -> bool {
        self.return_type.trim() != "void"
    }

    /// The parameter list of `entry_point`, padding included.
    ///
    /// Fails if the entry point has no parameter list or one of its parameters has no type
    /// spelling, since nothing consistent can be generated from it.
    pub fn params(&self, entry_point: &str) -> Result<&[Param], FormatError> {
        let params = self
            .entry_point_params
            .get(entry_point)
            .ok_or_else(|| FormatError::MissingParameters {
                function: self.name.clone(),
                entry_point: entry_point.to_owned(),
            })?;

        if let Some(p) = params.iter().find(|p| p.ty.trim().is_empty()) {
            return Err(FormatError::EmptyType {
                function: self.name.clone(),
                entry_point: entry_point.to_owned(),
                param: p.name.clone(),
            });
        }

        Ok(params)
    }
}

/// The complete set of functions of one API description, ordered by offset.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    functions: Vec<Function>,
}

impl Registry {
    /// Builds a registry from already assembled functions.
    ///
    /// Functions are ordered by ascending offset; functions sharing an offset keep the order
    /// they were given in. Every function needs at least one entry point and no entry point
    /// name may appear twice in the whole registry.
    pub fn from_functions(mut functions: Vec<Function>) -> Result<Registry, LoadError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for func in &functions {
            if func.entry_points.is_empty() {
                return Err(LoadError::EmptyEntryPoints {
                    function: func.name.clone(),
                });
            }

            for ep in &func.entry_points {
                if let Some(first) = seen.insert(ep, &func.name) {
                    return Err(LoadError::DuplicateEntryPoint {
                        name: ep.clone(),
                        first: first.to_owned(),
                        second: func.name.clone(),
                    });
                }
            }
        }

        // stable, so equal offsets keep description order
        functions.sort_by_key(|f| f.offset);

        Ok(Registry { functions })
    }

    /// Loads and validates the description at `path`, following `xi:include`s.
    pub fn load<P>(path: P) -> Result<Registry, LoadError>
    where P: AsRef<Path> {
        let registry = Registry::from_functions(parse::from_file(path.as_ref())?)?;

        debug!(
            "loaded {} functions with {} entry points from {}",
            registry.functions.len(),
            registry.functions.iter().map(|f| f.entry_points.len()).sum::<usize>(),
            path.as_ref().display()
        );

        Ok(registry)
    }

    /// Loads `$GLAPI_PATH/gl_API.xml`.
    pub fn from_env() -> Result<Registry, LoadError> {
        let dir = env::var_os(GLAPI_PATH_VAR).ok_or(LoadError::MissingEnv(GLAPI_PATH_VAR))?;
        Registry::load(description_path(dir))
    }

    /// Every function exactly once, in non-decreasing offset order.
    pub fn functions_by_offset(&self) -> slice::Iter<'_, Function> {
        self.functions.iter()
    }

    /// Every entry point of every desktop function, in offset order and then in entry point
    /// order. This is the traversal all generators share.
    pub fn desktop_entry_points(&self) -> impl Iterator<Item = (&Function, &str)> + '_ {
        self.functions_by_offset()
            .filter(|func| {
                if !func.desktop {
                    trace!("skipping non-desktop function {}", func.name);
                }
                func.desktop
            })
            .flat_map(|func| func.entry_points.iter().map(move |ep| (func, ep.as_str())))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Runs `generator` over this registry, writing its artifact to `dest`.
    pub fn write_bindings<G, W>(&self, generator: G, dest: &mut W) -> Result<(), FormatError>
    where
        G: Generator,
        W: io::Write,
    {
        generator.write(self, dest)
    }
}

/// The top-level description file inside a `$GLAPI_PATH` style directory.
pub fn description_path<P>(dir: P) -> PathBuf
where P: AsRef<Path> {
    dir.as_ref().join(GLAPI_FILE)
}
