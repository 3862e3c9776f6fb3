#[cfg(windows)]
extern crate winres;

#[cfg(windows)]
fn main() {
    println!("cargo:rerun-if-changed=assets/icons/icon.ico");

    let mut res = winres::WindowsResource::new();
    res.set_icon("assets/icons/icon.ico");
    res.set("FileDescription", "VidQueue video downloader");
    res.set("ProductName", "VidQueue");
    if let Err(e) = res.compile() {
        println!("cargo:warning=failed to embed Windows resources: {}", e);
    }
}

#[cfg(not(windows))]
fn main() {
    // Icon is embedded at runtime on macOS/Linux; the bundle picks up assets/icons.
    println!("cargo:rerun-if-changed=build.rs");
}
