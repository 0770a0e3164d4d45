/// Build script for hello_gpu
///
/// Shader sources are embedded with include_str!, so Cargo does not track
/// them on its own. The rerun hints keep incremental builds honest when
/// only a WGSL file changes.
fn main() {
    println!("cargo:rerun-if-changed=src/gfx/shaders/vertex.wgsl");
    println!("cargo:rerun-if-changed=src/gfx/shaders/fragment.wgsl");
}
