use super::*;

#[test]
fn builtin_has_three_games_in_order() {
    let registry = Registry::builtin();
    assert_eq!(registry.keys(), vec!["gi", "hsr", "zzz"]);
    assert!(registry.validate().is_ok());
}

#[test]
fn find_is_case_insensitive() {
    let registry = Registry::builtin();
    assert_eq!(registry.find("GI").unwrap().key, "gi");
    assert_eq!(registry.find("HkRpg").unwrap().key, "hsr");
    assert_eq!(registry.find(" nap ").unwrap().key, "zzz");
    assert!(registry.find("honkai3").is_none());
}

#[test]
fn urls_use_path_segments() {
    let registry = Registry::builtin();
    let gi = registry.find("gi").unwrap();
    assert_eq!(
        gi.gacha_list_url(),
        "https://operation-webstatic.mihoyo.com/gacha_info/hk4e/cn_gf01/gacha/list.json"
    );
    assert_eq!(
        gi.gacha_detail_url("abc123"),
        "https://operation-webstatic.mihoyo.com/gacha_info/hk4e/cn_gf01/abc123/zh-cn.json"
    );

    let hsr = registry.find("hsr").unwrap();
    assert_eq!(hsr.catalog_url("lightcone"), "https://api.hakush.in/hsr/data/lightcone.json");
}

#[test]
fn banner_config_per_category() {
    let registry = Registry::builtin();
    let zzz = registry.find("zzz").unwrap();
    assert_eq!(zzz.banner_config(Category::Character).manual_file, "2001.yaml");
    assert_eq!(zzz.banner_config(Category::Weapon).banner_types, vec![3001, 3002, 3011, 3012]);

    let gi = registry.find("gi").unwrap();
    assert_eq!(gi.banner_config(Category::Character).banner_types, vec![301, 400]);
    assert_eq!(gi.up_fields.five_star, "r5_up_items");
}

#[test]
fn toml_registry_round_trips_builtin_shape() {
    let toml_text = r#"
[[games]]
key = "gi"
name = "原神"
gacha_path = "hk4e/cn_gf01"
catalog_key = "gi"

[games.up_fields]
five_star = "r5_up_items"
four_star = "r4_up_items"

[games.character]
banner_types = [301, 400]
manual_file = "301.yaml"

[games.weapon]
banner_types = [302]
manual_file = "302.yaml"

[[games.catalog_menus]]
menu_id = "weapon"
category = "weapon"
"#;
    let registry = Registry::from_toml_str(toml_text).unwrap();
    assert_eq!(registry.games.len(), 1);
    let gi = &registry.games[0];
    assert!(gi.aliases.is_empty());
    assert_eq!(gi.catalog_menus[0].category, Category::Weapon);
    assert_eq!(gi.weapon.manual_file, "302.yaml");
}

#[test]
fn duplicate_alias_is_rejected() {
    let mut registry = Registry::builtin();
    registry.games[1].aliases.push("GI".into());
    assert!(matches!(registry.validate(), Err(RegistryError::Invalid(_))));
}

#[test]
fn empty_registry_is_rejected() {
    let err = Registry::from_toml_str("games = []").unwrap_err();
    assert!(matches!(err, RegistryError::Invalid(_)));
}
