use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_DEFAULT_LOCALE: &str = "fa";

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let locales_dir = manifest_dir.join("locales");
    println!("cargo:rerun-if-changed={}", locales_dir.display());
    println!("cargo:rerun-if-env-changed=ARBE_DEFAULT_LOCALE");

    let default_locale = env::var("ARBE_DEFAULT_LOCALE")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_DEFAULT_LOCALE.to_string());

    let catalogs = match load_catalogs(&locales_dir) {
        Ok(catalogs) => catalogs,
        Err(error) => panic!("failed to load locale catalogs: {error}"),
    };

    let mut out = String::new();
    out.push_str(&format!(
        "pub const DEFAULT_LOCALE: &str = {default_locale:?};\n"
    ));
    out.push_str("pub static LOCALES: &[(&str, &[(&str, &str)])] = &[\n");
    for (locale, entries) in &catalogs {
        out.push_str(&format!("    ({locale:?}, &[\n"));
        for (key, value) in entries {
            out.push_str(&format!("        ({key:?}, {value:?}),\n"));
        }
        out.push_str("    ]),\n");
    }
    out.push_str("];\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap_or_default());
    if let Err(error) = fs::write(out_dir.join("arbe_i18n_generated.rs"), out) {
        panic!("failed to write generated i18n catalog: {error}");
    }
}

fn load_catalogs(dir: &Path) -> Result<BTreeMap<String, BTreeMap<String, String>>, String> {
    let mut catalogs = BTreeMap::new();
    let entries = fs::read_dir(dir).map_err(|error| format!("{}: {error}", dir.display()))?;
    for entry in entries {
        let path = entry.map_err(|error| error.to_string())?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let source =
            fs::read_to_string(&path).map_err(|error| format!("{}: {error}", path.display()))?;
        let table = source
            .parse::<toml::Table>()
            .map_err(|error| format!("{}: {error}", path.display()))?;
        let mut flat = BTreeMap::new();
        flatten("", &table, &mut flat);
        catalogs.insert(locale.to_string(), flat);
    }
    Ok(catalogs)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(text) => {
                out.insert(full_key, text.clone());
            }
            toml::Value::Table(nested) => flatten(&full_key, nested, out),
            _ => println!("cargo:warning=ignoring non-string locale entry {full_key}"),
        }
    }
}
