//! Resolution of `$ref`s that point at other files.
//!
//! A reference such as `common.yml#/types/Address` or `person.json` is read relative to the
//! directory of the file that contains it. The referenced definition is copied into the
//! document's `types` and the reference is rewritten to `#/types/<Name>`. After this pass every
//! reference in the document is local.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use heck::ToUpperCamelCase;

use crate::error::ParseError;
use crate::types::{PropertyDef, SchemaDocument, TypeDef, TypeRef};

pub(crate) fn resolve_external_refs(doc: &mut SchemaDocument, path: &Path) -> Result<(), ParseError> {
    let mut resolver = Resolver {
        root: std::fs::canonicalize(path).ok(),
        local: doc.types.keys().cloned().collect(),
        ..Resolver::default()
    };
    let origin = Origin::Root(path);

    for svc in &mut doc.services {
        for op in &mut svc.operations {
            for slot in [&mut op.input, &mut op.output].into_iter().flatten() {
                if let Some(name) = resolver.rewrite(&origin, &slot.reference)? {
                    *slot = TypeRef::local(&name);
                }
            }
        }
    }
    for def in doc.types.values_mut() {
        resolver.rewrite_type(&origin, def)?;
    }

    if !resolver.imported.is_empty() {
        tracing::debug!(
            path = %path.display(),
            types = resolver.imported.len(),
            "imported referenced types"
        );
    }
    doc.types.extend(resolver.imported);
    Ok(())
}

/// Where a reference was written. Fragment-only references stay local in the root document
/// but point into the same file everywhere else.
enum Origin<'a> {
    Root(&'a Path),
    Imported(PathBuf),
}

impl Origin<'_> {
    fn file(&self) -> &Path {
        match self {
            Origin::Root(path) => *path,
            Origin::Imported(path) => path.as_path(),
        }
    }
}

#[derive(Default)]
struct Resolver {
    root: Option<PathBuf>,
    /// Type names declared by the root document.
    local: HashSet<String>,
    /// Parsed referenced files, keyed by path.
    files: HashMap<PathBuf, serde_json::Value>,
    /// `(file, pointer)` to the type name it was imported as.
    names: HashMap<(PathBuf, String), String>,
    imported: BTreeMap<String, TypeDef>,
}

impl Resolver {
    /// Returns the local name `reference` now resolves to, or `None` when it is already local.
    fn rewrite(&mut self, origin: &Origin<'_>, reference: &str) -> Result<Option<String>, ParseError> {
        let (file, fragment) = match reference.split_once('#') {
            Some((file, fragment)) => (file, fragment),
            None => (reference, ""),
        };
        if file.is_empty() {
            return match origin {
                Origin::Root(_) => Ok(None),
                Origin::Imported(path) => self.import(path.clone(), fragment, reference).map(Some),
            };
        }
        let target = match origin.file().parent() {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };
        self.import(target, fragment, reference).map(Some)
    }

    fn rewrite_type(&mut self, origin: &Origin<'_>, def: &mut TypeDef) -> Result<(), ParseError> {
        for prop in def.properties.values_mut() {
            self.rewrite_property(origin, prop)?;
        }
        Ok(())
    }

    fn rewrite_property(&mut self, origin: &Origin<'_>, prop: &mut PropertyDef) -> Result<(), ParseError> {
        if let Some(reference) = &prop.reference {
            if let Some(name) = self.rewrite(origin, reference)? {
                prop.reference = Some(TypeRef::local(&name).reference);
            }
        }
        if let Some(items) = prop.items.as_deref_mut() {
            self.rewrite_property(origin, items)?;
        }
        Ok(())
    }

    fn import(&mut self, file: PathBuf, fragment: &str, reference: &str) -> Result<String, ParseError> {
        let file = std::fs::canonicalize(&file).map_err(|source| ParseError::Io {
            path: file.display().to_string(),
            source,
        })?;
        // A reference back into the root document names one of its own types.
        if self.root.as_ref() == Some(&file) {
            if let Some(name) = fragment.strip_prefix("/types/").filter(|n| self.local.contains(*n)) {
                return Ok(name.to_string());
            }
        }
        let key = (file.clone(), fragment.to_string());
        if let Some(name) = self.names.get(&key) {
            return Ok(name.clone());
        }

        let unresolved = |reason: String| ParseError::Ref {
            reference: reference.to_string(),
            file: file.display().to_string(),
            reason,
        };

        if !self.files.contains_key(&file) {
            let value = load_value(&file)?;
            self.files.insert(file.clone(), value);
        }
        let target = self
            .files
            .get(&file)
            .and_then(|doc| doc.pointer(fragment))
            .cloned()
            .ok_or_else(|| unresolved("no definition at this location".to_string()))?;

        let name = type_name(&file, fragment, &target)
            .ok_or_else(|| unresolved("cannot derive a type name".to_string()))?;
        if self.local.contains(&name) || self.imported.contains_key(&name) || self.names.values().any(|n| *n == name) {
            return Err(unresolved(format!("type name `{name}` is already defined")));
        }

        let mut def: TypeDef =
            serde_json::from_value(target).map_err(|e| unresolved(format!("not a message type: {e}")))?;
        strip_keywords(&mut def);

        // Registered before recursing so references back to this type terminate.
        self.names.insert(key, name.clone());
        self.rewrite_type(&Origin::Imported(file), &mut def)?;
        self.imported.insert(name.clone(), def);
        Ok(name)
    }
}

/// Plain JSON Schema files carry keywords (`$schema`, `format`, `definitions`...) this IDL does
/// not model. Only `x-` extensions survive the import.
fn strip_keywords(def: &mut TypeDef) {
    fn strip_property(prop: &mut PropertyDef) {
        prop.extensions.retain(|key, _| key.starts_with("x-"));
        if let Some(items) = prop.items.as_deref_mut() {
            strip_property(items);
        }
    }
    def.extensions.retain(|key, _| key.starts_with("x-"));
    def.properties.values_mut().for_each(strip_property);
}

fn load_value(file: &Path) -> Result<serde_json::Value, ParseError> {
    let body = std::fs::read_to_string(file).map_err(|source| ParseError::Io {
        path: file.display().to_string(),
        source,
    })?;
    let is_json = match file.extension().and_then(|e| e.to_str()) {
        Some("json") => true,
        Some("yml" | "yaml") => false,
        _ => body.trim_start().starts_with('{'),
    };
    if is_json {
        Ok(serde_json::from_str(&body)?)
    } else {
        Ok(serde_yaml::from_str(&body)?)
    }
}

/// The pointer's last segment, else the definition's `title`, else the file stem.
fn type_name(file: &Path, fragment: &str, target: &serde_json::Value) -> Option<String> {
    if let Some(last) = fragment.rsplit('/').next().filter(|s| !s.is_empty()) {
        return Some(last.replace("~1", "/").replace("~0", "~"));
    }
    if let Some(title) = target.get("title").and_then(|t| t.as_str()) {
        return Some(title.to_upper_camel_case());
    }
    file.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_upper_camel_case())
}
