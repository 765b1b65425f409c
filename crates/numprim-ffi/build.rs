//! Writes `include/numprim.h` from the `extern "C"` surface.
//!
//! Header generation is best effort: a cbindgen failure becomes a cargo
//! warning so the library itself still builds.

use std::env;
use std::path::{Path, PathBuf};

const HEADER: &str = "numprim.h";

fn main() {
    let Some(crate_dir) = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR unset; skipping {HEADER}");
        return;
    };
    let config_path = crate_dir.join("cbindgen.toml");

    println!("cargo:rerun-if-changed={}", config_path.display());
    println!("cargo:rerun-if-changed={}", crate_dir.join("src").display());

    if let Err(reason) = write_header(&crate_dir, &config_path) {
        println!("cargo:warning=skipping {HEADER}: {reason}");
    }
}

fn write_header(crate_dir: &Path, config_path: &Path) -> Result<(), String> {
    let config = cbindgen::Config::from_file(config_path)?;
    let include_dir = crate_dir.join("include");
    std::fs::create_dir_all(&include_dir)
        .map_err(|e| format!("cannot create {}: {e}", include_dir.display()))?;
    let bindings = cbindgen::generate_with_config(crate_dir, config).map_err(|e| e.to_string())?;
    bindings.write_to_file(include_dir.join(HEADER));
    Ok(())
}
