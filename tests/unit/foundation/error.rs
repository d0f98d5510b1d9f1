use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HuntmapError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(HuntmapError::input("x").to_string().contains("input error:"));
    assert!(HuntmapError::render("x").to_string().contains("render error:"));
    assert!(
        HuntmapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HuntmapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: HuntmapError = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
    assert!(matches!(err, HuntmapError::Serde(_)));
}
