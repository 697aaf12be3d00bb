use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=public/client.js");

    let js = fs::read_to_string("public/client.js").expect("public/client.js not found");
    let minified = minifier::js::minify(&js).to_string();

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    fs::write(Path::new(&out_dir).join("client.min.js"), &minified)
        .expect("failed to write client.min.js");

    // Hash the built bundle for cache-busting
    let hash = crc32fast::hash(minified.as_bytes());
    println!("cargo:rustc-env=APOD_CLIENT_JS_HASH={hash:08x}");
}
