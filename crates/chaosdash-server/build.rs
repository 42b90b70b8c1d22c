// build.rs for chaosdash-server
//
// rust_embed needs the embedded folder at compile time. Without a
// `trunk build` run, frontend/dist does not exist yet, so a placeholder
// index.html is written to keep the crate compiling.

use std::path::Path;

fn main() {
    let dist = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../frontend/dist");

    if !dist.exists() {
        std::fs::create_dir_all(&dist).expect("failed to create placeholder frontend/dist");
        std::fs::write(
            dist.join("index.html"),
            "<!-- placeholder: run `trunk build` in frontend/ to build the real dashboard -->\n",
        )
        .expect("failed to write placeholder index.html");
    }

    println!("cargo:rerun-if-changed=../../frontend/dist");
}
