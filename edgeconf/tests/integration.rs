use std::path::{Path, PathBuf};
use std::process::{Command, Output};

struct TestSite {
    dir: tempfile::TempDir,
}

impl TestSite {
    fn new(manifest: serde_json::Value) -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("site-manifest.json"),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn manifest(&self) -> PathBuf {
        self.path().join("site-manifest.json")
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

fn edgeconf(args: &[&str]) -> Output {
    // Use the compiled binary (avoids cargo lock issues)
    Command::new(env!("CARGO_BIN_EXE_edgeconf"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run edgeconf")
}

fn storefront() -> serde_json::Value {
    serde_json::json!({
        "pathPrefix": "",
        "pages": [
            { "path": "/", "componentChunkName": "component---index" },
            {
                "path": "/__client-side-product__/p",
                "matchPath": "/:slug/p",
                "componentChunkName": "component---product"
            },
            {
                "path": "/__client-side-search__",
                "matchPath": "/*",
                "componentChunkName": "component---search"
            }
        ],
        "redirects": [
            {
                "fromPath": "/api/*",
                "toPath": "https://example.com/api/:splat",
                "isPermanent": false,
                "redirectInBrowser": false,
                "statusCode": 200
            }
        ],
        "assets": { "app": "app-1a.js" },
        "assetsByChunkName": {
            "commons": ["commons-2b.js"],
            "component---product": ["component---product-4d.js"]
        }
    })
}

#[test]
fn test_generate_writes_next_to_manifest() {
    let site = TestSite::new(storefront());
    let manifest = site.manifest();

    let output = edgeconf(&["generate", "--site", manifest.to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = std::fs::read_to_string(site.path().join("nginx.out.conf")).unwrap();
    assert!(text.starts_with("worker_processes 3;\n"));
    assert!(text.contains("    location = /component---product-4d.js {\n"));
    assert!(text.contains("    location ~* ^/api/.* {\n      proxy_pass https://example.com$uri$is_args$args;\n"));

    let product = text.find("rewrite ^/.*?/p /__client-side-product__/p;").unwrap();
    let search = text.find("rewrite ^/.* /__client-side-search__;").unwrap();
    assert!(product < search);
}

#[test]
fn test_generate_stdout_with_config() {
    let site = TestSite::new(storefront());
    let config = site.write(
        "edgeconf.toml",
        r#"
[storage]
origin = "https://bucket.example.com/public"

[policy]
slug = "single-segment"
rewrite_terminal = "not-found"
"#,
    );

    let output = edgeconf(&[
        "generate",
        "--site",
        site.manifest().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--stdout",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("rewrite ^/[^/]+/p /__client-side-product__/p last;"));
    assert!(text.contains("return 404;"));
    assert!(text.contains("proxy_pass https://bucket.example.com/public$uri;"));
    assert!(!site.path().join("nginx.out.conf").exists());
}

#[test]
fn test_generate_rejects_unrenderable_config() {
    let site = TestSite::new(storefront());
    let config = site.write("edgeconf.toml", "[storage]\nfallback_status_codes = []\n");

    let output = edgeconf(&[
        "generate",
        "--site",
        site.manifest().to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fallback_status_codes"));
    assert!(!site.path().join("nginx.out.conf").exists());
}

#[test]
fn test_generate_custom_out_dir() {
    let site = TestSite::new(storefront());
    let out = tempfile::tempdir().unwrap();

    let output = edgeconf(&[
        "generate",
        "--site",
        site.manifest().to_str().unwrap(),
        "--out-dir",
        out.path().to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(out.path().join("nginx.out.conf").exists());
}

#[test]
fn test_invalid_redirect_fails_build() {
    let mut manifest = storefront();
    manifest["redirects"][0]["toPath"] = serde_json::json!("https://example.com/v2/:splat");
    let site = TestSite::new(manifest);

    let output = edgeconf(&["generate", "--site", site.manifest().to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("paths must match"));
    assert!(!site.path().join("nginx.out.conf").exists());

    let output = edgeconf(&["validate", "--site", site.manifest().to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_validate() {
    let site = TestSite::new(storefront());
    let output = edgeconf(&["validate", "--site", site.manifest().to_str().unwrap()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 redirect(s) valid"));
}

#[test]
fn test_default_config() {
    let output = edgeconf(&["default-config"]);
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("worker_processes = 3"));
    assert!(text.contains("slug = \"lazy\""));
    assert!(text.contains("file_name = \"nginx.out.conf\""));
}
