#[test]
fn version_matches_package() {
    assert_eq!(narwhal::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!narwhal::VERSION.is_empty());
}
