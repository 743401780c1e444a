use anyhow::{Context, Result, anyhow};
use schemars::{JsonSchema, Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
    Choice,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub allowed: Option<Vec<String>>,
}

impl FieldSpec {
    /// Checks a value against this field's bounds or choices.
    pub fn check(&self, value: &Value) -> Result<()> {
        match self.kind {
            FieldKind::Integer | FieldKind::Number => {
                let x = value
                    .as_f64()
                    .ok_or_else(|| anyhow!("{} must be a number, got {value}", self.title))?;
                if let Some(lo) = self.min
                    && x < lo
                {
                    return Err(anyhow!("{} must be at least {lo}, got {x}", self.title));
                }
                if let Some(hi) = self.max
                    && x > hi
                {
                    return Err(anyhow!("{} must be at most {hi}, got {x}", self.title));
                }
                Ok(())
            }
            FieldKind::Choice => {
                let s = value
                    .as_str()
                    .ok_or_else(|| anyhow!("{} must be one of its choices, got {value}", self.title))?;
                match &self.allowed {
                    Some(opts) if !opts.iter().any(|o| o == s) => Err(anyhow!(
                        "{} must be one of: {}; got '{s}'",
                        self.title,
                        opts.join(", ")
                    )),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// Field specs for every top-level property of `T`, in declaration order.
pub fn specs_for<T: JsonSchema>() -> Result<Vec<FieldSpec>> {
    specs_from_schema(&schema_for!(T))
}

pub fn specs_from_schema(root: &Schema) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let props = root_obj
        .get("properties")
        .and_then(|v| v.as_object())
        .context("root schema has no properties")?;

    let mut out = Vec::new();
    for (name, field_schema) in props {
        let field_obj = field_schema
            .as_object()
            .context("field schema not object")?;

        let target = field_obj
            .get("allOf")
            .and_then(|v| v.as_array())
            .filter(|a| a.len() == 1)
            .and_then(|a| a[0].as_object())
            .unwrap_or(field_obj);

        // keywords next to a $ref describe the field, the target describes the type
        let type_obj = resolve_ref_obj(root_obj, target)
            .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;

        let lookup = |key: &str| field_obj.get(key).or_else(|| type_obj.get(key));

        let title = lookup("title")
            .and_then(|v| v.as_str())
            .unwrap_or(name)
            .to_string();

        let description = lookup("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let default = field_obj.get("default").cloned();

        let allowed = type_obj
            .get("enum")
            .and_then(|v| v.as_array())
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect::<Vec<_>>()
            })
            .or_else(|| one_of_consts(type_obj));

        let kind = if allowed.is_some() {
            FieldKind::Choice
        } else {
            match detect_field_kind(type_obj.get("type")) {
                Some(k) => k,
                None => continue,
            }
        };

        let min = lookup("minimum")
            .or_else(|| lookup("exclusiveMinimum"))
            .and_then(|v| v.as_f64());

        let max = lookup("maximum")
            .or_else(|| lookup("exclusiveMaximum"))
            .and_then(|v| v.as_f64());

        out.push(FieldSpec {
            name: name.clone(),
            title,
            description,
            kind,
            default,
            min,
            max,
            allowed,
        });
    }

    Ok(out)
}

/// Unit enums with per-variant docs come out as `oneOf` of `const` strings.
fn one_of_consts(obj: &Map<String, Value>) -> Option<Vec<String>> {
    let alts = obj.get("oneOf").and_then(|v| v.as_array())?;
    alts.iter()
        .map(|b| b.get("const").and_then(|c| c.as_str()).map(str::to_string))
        .collect()
}

/// Resolve a local $ref like "#/$defs/Gender" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    let from_name = |s: &str| match s {
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        _ => None,
    };
    match ty {
        Some(Value::String(s)) => from_name(s),
        Some(Value::Array(arr)) => arr.iter().filter_map(|v| v.as_str()).find_map(from_name),
        _ => None,
    }
}
