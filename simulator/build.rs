//! Build script for the simulator binary.
//!
//! On Windows, wires up the vendored SDL2 import library and copies
//! SDL2.dll next to the produced executable. Linux and macOS resolve SDL2
//! through the system package manager, so nothing happens there.

use std::path::PathBuf;
use std::{env, fs};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let vendor_sdl2 = manifest_dir.parent().unwrap().join("vendor").join("sdl2");

    if vendor_sdl2.exists() {
        println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());

        // OUT_DIR is target/<profile>/build/<pkg>-<hash>/out; walk up to the
        // profile directory so the DLL lands next to the binary
        if let Ok(out_dir) = env::var("OUT_DIR") {
            let out_path = PathBuf::from(&out_dir);
            if let Some(target_dir) = out_path
                .ancestors()
                .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
            {
                let dll_src = vendor_sdl2.join("SDL2.dll");
                let dll_dst = target_dir.join("SDL2.dll");

                if dll_src.exists() && !dll_dst.exists() {
                    if let Err(e) = fs::copy(&dll_src, &dll_dst) {
                        println!("cargo:warning=Failed to copy SDL2.dll: {}", e);
                    } else {
                        println!("cargo:warning=Copied SDL2.dll to {}", dll_dst.display());
                    }
                }
            }
        }
    } else {
        println!(
            "cargo:warning=SDL2 vendor directory not found at {}",
            vendor_sdl2.display()
        );
        println!("cargo:warning=Place SDL2.lib and SDL2.dll in vendor/sdl2/ for Windows builds");
    }

    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());
}
