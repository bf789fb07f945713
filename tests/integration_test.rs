use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Runs `pwa-icon-gen -o <tempdir>` and asserts that both launcher icons
/// exist, decode as RGBA PNGs of the exact requested size, and carry the
/// rounded-corner alpha mask.
#[test]
fn test_generates_both_launcher_icons() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");

    run_generator(&output_dir);

    for size in [192u32, 512] {
        let icon_path = output_dir.join(format!("icon-{size}x{size}.png"));
        assert!(
            icon_path.exists(),
            "icon should exist at: {}",
            icon_path.display()
        );

        let file_size = fs::metadata(&icon_path)
            .expect("Failed to stat icon")
            .len();
        assert!(file_size > 0, "icon file should be non-empty");

        let decoded = image::open(&icon_path).expect("icon should decode as a valid PNG");
        assert_eq!(decoded.width(), size, "icon width should be {size}");
        assert_eq!(decoded.height(), size, "icon height should be {size}");

        let rgba = decoded.to_rgba8();

        // Rounded corners: fully transparent at the four corner pixels,
        // fully opaque at the center.
        for (x, y) in [(0, 0), (size - 1, 0), (0, size - 1), (size - 1, size - 1)] {
            assert_eq!(
                rgba.get_pixel(x, y)[3],
                0,
                "corner ({x}, {y}) of the {size}px icon should be transparent"
            );
        }
        assert_eq!(
            rgba.get_pixel(size / 2, size / 2)[3],
            255,
            "center of the {size}px icon should be opaque"
        );
    }

    println!("✓ Integration test passed: both launcher icons generated");
}

/// Rendering is deterministic: two runs with identical inputs produce
/// byte-identical PNG files.
#[test]
fn test_output_is_byte_identical_across_runs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let first_dir = temp_dir.path().join("first");
    let second_dir = temp_dir.path().join("second");

    run_generator(&first_dir);
    run_generator(&second_dir);

    for size in [192u32, 512] {
        let name = format!("icon-{size}x{size}.png");
        let first = fs::read(first_dir.join(&name)).expect("Failed to read first run output");
        let second = fs::read(second_dir.join(&name)).expect("Failed to read second run output");
        assert_eq!(first, second, "{name} should be byte-identical across runs");
    }

    println!("✓ Determinism test passed: repeated runs match byte for byte");
}

/// The output directory is created when missing; existing files are
/// overwritten without confirmation.
#[test]
fn test_overwrites_existing_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("icons");
    fs::create_dir_all(&output_dir).unwrap();

    let stale_path = output_dir.join("icon-192x192.png");
    fs::write(&stale_path, b"not a png").unwrap();

    run_generator(&output_dir);

    let decoded = image::open(&stale_path).expect("stale file should be replaced by a valid PNG");
    assert_eq!(decoded.width(), 192);
}

/// Run the generator binary against the given output directory, panicking
/// with its output if it fails.
fn run_generator(output_dir: &Path) {
    let binary_path = get_binary_path();

    let output = Command::new(&binary_path)
        .arg("-o")
        .arg(output_dir)
        .output()
        .expect("Failed to run pwa-icon-gen");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("pwa-icon-gen command failed");
    }
}

/// Gets the path to the pwa-icon-gen binary (either from cargo build or
/// target directory)
fn get_binary_path() -> PathBuf {
    // First try to find in target/debug
    let debug_path = Path::new("target/debug/pwa-icon-gen");
    if debug_path.exists() {
        return debug_path.to_path_buf();
    }

    // If not found, build it first
    let build_output = Command::new("cargo")
        .args(["build", "--bin", "pwa-icon-gen"])
        .output()
        .expect("Failed to run cargo build");

    if !build_output.status.success() {
        panic!(
            "Failed to build pwa-icon-gen binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    debug_path.to_path_buf()
}
