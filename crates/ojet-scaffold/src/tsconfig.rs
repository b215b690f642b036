//! `tsconfig.json` generation and path mapping

use crate::error::Result;
use ojet_core::Project;
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::debug;

/// Initial `tsconfig.json` for a TypeScript app
pub(crate) fn initial(project: &Project) -> Value {
    let source = &project.config().paths.source;
    let script_root = format!("./{}/{}", source.common, source.typescript);
    json!({
        "compileOnSave": true,
        "compilerOptions": {
            "baseUrl": script_root,
            "target": "es6",
            "module": "amd",
            "moduleResolution": "node",
            "allowJs": true,
            "sourceMap": true,
            "resolveJsonModule": true,
            "typeRoots": ["./node_modules/@oracle/oraclejet/dist/types", "./node_modules/@types"],
            "paths": {}
        },
        "include": [format!("{}/**/*", script_root)]
    })
}

pub(crate) fn write(path: &Path, value: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

/// Map `<alias>/*` to `<target>/*` in `compilerOptions.paths` when the project has a tsconfig
pub(crate) fn add_path_mapping(project: &Project, alias: &str, target: &Path) -> Result<bool> {
    let path = project.tsconfig_path();
    if !path.is_file() {
        return Ok(false);
    }

    let mut config: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let relative = target.strip_prefix(project.root()).unwrap_or(target);
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let root = ensure_object(&mut config);
    let options = ensure_object(root.entry("compilerOptions").or_insert_with(|| json!({})));
    let paths = ensure_object(options.entry("paths").or_insert_with(|| json!({})));
    paths.insert(
        format!("{}/*", alias),
        json!([format!("./{}/*", relative)]),
    );

    write(&path, &config)?;
    debug!("Added tsconfig path mapping for {}", alias);
    Ok(true)
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just made an object"),
    }
}
