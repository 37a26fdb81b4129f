use cfg_aliases::cfg_aliases;

fn main() {
	println!("cargo:rerun-if-changed=build.rs");

	// Declare custom cfg to avoid warnings in Rust 2024 edition
	println!("cargo::rustc-check-cfg=cfg(client)");
	println!("cargo::rustc-check-cfg=cfg(server)");

	cfg_aliases! {
		// Use `#[cfg(client)]` for the browser build
		client: { all(target_arch = "wasm32", target_os = "unknown") },
		// Use `#[cfg(server)]` for native builds (tests, server-side rendering)
		server: { not(all(target_arch = "wasm32", target_os = "unknown")) },
	}
}
