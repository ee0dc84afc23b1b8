use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => dir,
        Err(_) => return,
    };
    let output_file = target_dir().join("aesgcmsiv.h");

    // A header failure must not fail the library build.
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(cbindgen_config())
        .generate()
    {
        Ok(bindings) => {
            if let Some(dir) = output_file.parent() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    println!("cargo:warning=cannot create {}: {e}", dir.display());
                    return;
                }
            }
            bindings.write_to_file(&output_file);
            if !output_file.exists() {
                println!("cargo:warning=C header not written to {}", output_file.display());
            }
        }
        Err(e) => println!("cargo:warning=C header not generated: {e}"),
    }
}

fn cbindgen_config() -> cbindgen::Config {
    cbindgen::Config {
        language: cbindgen::Language::C,
        include_guard: Some("AESGCMSIV_H".into()),
        documentation: true,
        sys_includes: vec!["stdint.h".into(), "stddef.h".into()],
        no_includes: true,
        ..Default::default()
    }
}

fn target_dir() -> PathBuf {
    if let Ok(target) = env::var("CARGO_TARGET_DIR") {
        PathBuf::from(target).join("include")
    } else {
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default())
            .join("../../target")
            .join("include")
    }
}
