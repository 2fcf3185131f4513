////////////////////////////////////////////////////////////////////////////////////
// Copyright (c) 2019 DasEtwas - All Rights Reserved                               /
//      Unauthorized copying of this file, via any medium is strictly prohibited   /
//      Proprietary and confidential                                               /
////////////////////////////////////////////////////////////////////////////////////

//! Reader for the `gl_API.xml` description grammar.
//!
//! Only the parts needed for dispatch generation are read: `<function>` elements with their
//! `<param>` and `<return>` children, and `xi:include`s. Everything else is skipped.

use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use xml::{
    attribute::OwnedAttribute,
    name::OwnedName,
    reader::{ParserConfig, XmlEvent},
};

use super::{Function, Param};
use crate::error::LoadError;

const XINCLUDE_NS: &str = "http://www.w3.org/2001/XInclude";
const ROOT_ELEMENT: &str = "OpenGLAPI";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Offset {
    Static(usize),
    Assign,
}

/// A `<function>` element as written, before aliases are resolved.
#[derive(Debug)]
struct RawFunction {
    name: String,
    alias: Option<String>,
    offset: Offset,
    desktop: bool,
    return_type: Option<String>,
    params: Vec<Param>,
    source: PathBuf,
}

/// Reads `path` and every file it includes, returning the resolved functions in
/// description order.
pub fn from_file(path: &Path) -> Result<Vec<Function>, LoadError> {
    let mut raw = Vec::new();
    let mut include_stack = Vec::new();
    read_file(path, &mut include_stack, &mut raw)?;
    resolve(raw)
}

fn read_file(
    path: &Path,
    include_stack: &mut Vec<PathBuf>,
    out: &mut Vec<RawFunction>,
) -> Result<(), LoadError> {
    // canonicalize so `a/../b.xml` and `b.xml` are recognised as the same include
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if include_stack.contains(&key) {
        return Err(LoadError::IncludeCycle { path: path.to_path_buf() });
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("reading API description {}", path.display());

    include_stack.push(key);
    let res = read_events(path, BufReader::new(file), include_stack, out);
    include_stack.pop();
    res
}

fn read_events<R>(
    path: &Path,
    src: R,
    include_stack: &mut Vec<PathBuf>,
    out: &mut Vec<RawFunction>,
) -> Result<(), LoadError>
where
    R: std::io::Read,
{
    let schema = |reason: String| LoadError::Schema {
        path: path.to_path_buf(),
        reason,
    };

    let reader = ParserConfig::new().trim_whitespace(true).create_reader(src);

    let mut saw_root = false;
    let mut current: Option<RawFunction> = None;

    for event in reader {
        let event = event.map_err(|source| LoadError::Xml {
            path: path.to_path_buf(),
            source,
        })?;

        match event {
            XmlEvent::StartElement { name, attributes, .. } => {
                if !saw_root {
                    if name.local_name != ROOT_ELEMENT {
                        return Err(schema(format!(
                            "expected <{}> as root element, found <{}>",
                            ROOT_ELEMENT, name.local_name
                        )));
                    }
                    saw_root = true;
                    continue;
                }

                if is_xinclude(&name) {
                    let href = attr(&attributes, "href")
                        .ok_or_else(|| schema("xi:include without href".to_owned()))?;
                    let included = path.parent().unwrap_or_else(|| Path::new("")).join(href);
                    read_file(&included, include_stack, out)?;
                    continue;
                }

                match (name.local_name.as_str(), current.as_mut()) {
                    ("function", Some(func)) => {
                        return Err(schema(format!("<function> nested inside `{}`", func.name)));
                    },
                    ("function", None) => {
                        current = Some(read_function(path, &attributes)?);
                    },
                    ("param", Some(func)) => {
                        let param = read_param(&attributes)
                            .map_err(|reason| schema(format!("function `{}`: {}", func.name, reason)))?;
                        func.params.push(param);
                    },
                    ("return", Some(func)) => {
                        let ty = attr(&attributes, "type")
                            .map(str::trim)
                            .filter(|ty| !ty.is_empty())
                            .ok_or_else(|| schema(format!("function `{}`: <return> without type", func.name)))?;
                        if func.return_type.is_some() {
                            return Err(schema(format!("function `{}`: more than one <return>", func.name)));
                        }
                        func.return_type = Some(ty.to_owned());
                    },
                    _ => {},
                }
            },
            XmlEvent::EndElement { name } => {
                if name.local_name == "function" {
                    if let Some(func) = current.take() {
                        out.push(func);
                    }
                }
            },
            _ => {},
        }
    }

    if !saw_root {
        return Err(schema("document has no root element".to_owned()));
    }

    Ok(())
}

fn is_xinclude(name: &OwnedName) -> bool {
    name.local_name == "include" && (name.namespace.as_deref() == Some(XINCLUDE_NS) || name.prefix.as_deref() == Some("xi"))
}

fn attr<'a>(attributes: &'a [OwnedAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.name.local_name == name && a.name.prefix.is_none())
        .map(|a| a.value.as_str())
}

fn read_function(path: &Path, attributes: &[OwnedAttribute]) -> Result<RawFunction, LoadError> {
    let schema = |reason: String| LoadError::Schema {
        path: path.to_path_buf(),
        reason,
    };

    let name = attr(attributes, "name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| schema("<function> without name".to_owned()))?;

    let offset = match attr(attributes, "offset") {
        None | Some("assign") => Offset::Assign,
        Some(n) => Offset::Static(
            n.trim()
                .parse()
                .map_err(|_| schema(format!("function `{}`: invalid offset `{}`", name, n)))?,
        ),
    };

    Ok(RawFunction {
        name: name.to_owned(),
        alias: attr(attributes, "alias").map(str::to_owned),
        offset,
        desktop: attr(attributes, "desktop") != Some("false"),
        return_type: None,
        params: Vec::new(),
        source: path.to_path_buf(),
    })
}

fn read_param(attributes: &[OwnedAttribute]) -> Result<Param, String> {
    let name = attr(attributes, "name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "<param> without name".to_owned())?;

    let ty = attr(attributes, "type")
        .map(str::trim)
        .filter(|ty| !ty.is_empty())
        .ok_or_else(|| format!("parameter `{}` has no type", name))?;

    Ok(Param {
        name: name.to_owned(),
        ty: ty.to_owned(),
        is_padding: attr(attributes, "padding") == Some("true"),
    })
}

/// Folds alias elements into the function they alias and assigns dynamic offsets.
fn resolve(raw: Vec<RawFunction>) -> Result<Vec<Function>, LoadError> {
    let schema = |raw: &RawFunction, reason: String| LoadError::Schema {
        path: raw.source.clone(),
        reason,
    };

    let out_of_range = |raw: &RawFunction| schema(raw, format!("function `{}`: offset out of range", raw.name));

    let mut next_offset = 0usize;
    for r in raw.iter().filter(|r| r.alias.is_none()) {
        if let Offset::Static(n) = r.offset {
            next_offset = next_offset.max(n.checked_add(1).ok_or_else(|| out_of_range(r))?);
        }
    }

    let alias_names: HashSet<String> = raw.iter().filter(|r| r.alias.is_some()).map(|r| r.name.clone()).collect();

    let mut functions = Vec::new();
    let mut by_name = HashMap::new();

    for r in raw.iter().filter(|r| r.alias.is_none()) {
        if by_name.contains_key(&r.name) {
            return Err(schema(r, format!("function `{}` is defined twice", r.name)));
        }

        let offset = match r.offset {
            Offset::Static(n) => n,
            Offset::Assign => {
                let offset = next_offset;
                next_offset = next_offset.checked_add(1).ok_or_else(|| out_of_range(r))?;
                offset
            },
        };

        let return_type = r.return_type.clone().unwrap_or_else(|| "void".to_owned());
        let mut func = Function::new(r.name.clone(), return_type, offset);
        func.desktop = r.desktop;

        by_name.insert(r.name.clone(), functions.len());
        functions.push(func);
    }

    // entry points follow description order, so an alias may precede its target
    for r in raw {
        let idx = match &r.alias {
            None => by_name[&r.name],
            Some(target) => *by_name.get(target).ok_or_else(|| {
                if alias_names.contains(target) {
                    schema(&r, format!("alias chain: `{}` aliases `{}`, which is itself an alias", r.name, target))
                } else {
                    schema(&r, format!("`{}` aliases unknown function `{}`", r.name, target))
                }
            })?,
        };

        let func = &mut functions[idx];

        if r.alias.is_some() {
            let ret = r.return_type.as_deref().unwrap_or("void");
            if ret != func.return_type {
                return Err(schema(
                    &r,
                    format!(
                        "alias `{}` returns `{}` but `{}` returns `{}`",
                        r.name, ret, func.name, func.return_type
                    ),
                ));
            }
        }

        if func.entry_point_params.contains_key(&r.name) {
            return Err(LoadError::DuplicateEntryPoint {
                name: r.name.clone(),
                first: func.name.clone(),
                second: func.name.clone(),
            });
        }

        func.entry_points.push(r.name.clone());
        func.entry_point_params.insert(r.name, r.params);
    }

    Ok(functions)
}
