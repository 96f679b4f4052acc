//! Locale-resolved navigation trees: labels, URLs and normalization.

mod common;

use menu_core::domain::{MenuItemType, ParentLink};
use menu_core::{NewMenu, NewMenuItem, TranslationSpec};

#[tokio::test]
async fn labels_and_urls_resolve_for_the_requested_locale() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("team"))
                .translation(TranslationSpec::label("en", "Team"))
                .translation(TranslationSpec::label("fr", "Équipe")),
        )
        .await
        .unwrap();

    let fr_tree = env.service.resolve_navigation("primary", Some("fr")).await.unwrap();
    assert_eq!(fr_tree.len(), 1);
    assert_eq!(fr_tree[0].label.as_deref(), Some("Équipe"));
    assert_eq!(fr_tree[0].url.as_deref(), Some("/fr/equipe"));

    let en_tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(en_tree[0].label.as_deref(), Some("Team"));
    assert_eq!(en_tree[0].url.as_deref(), Some("/team"));
}

#[tokio::test]
async fn unknown_locale_falls_back_to_an_available_translation() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home")),
        )
        .await
        .unwrap();

    let tree = env.service.resolve_navigation("primary", Some("de")).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].label.as_deref(), Some("Home"));
}

#[tokio::test]
async fn url_override_beats_page_resolution() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut spec = TranslationSpec::label("en", "Home");
    spec.url_override = Some("/landing".to_string());
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(spec),
        )
        .await
        .unwrap();

    let tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(tree[0].url.as_deref(), Some("/landing"));
}

#[tokio::test]
async fn url_override_applies_only_to_its_own_locale() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut en = TranslationSpec::label("en", "Team");
    en.url_override = Some("/en/meet-the-team".to_string());
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("team"))
                .translation(en)
                .translation(TranslationSpec::label("fr", "Équipe")),
        )
        .await
        .unwrap();

    let en_tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(en_tree[0].url.as_deref(), Some("/en/meet-the-team"));

    // French has no override of its own; the English one must not leak in
    // through translation fallback. The page URL wins.
    let fr_tree = env.service.resolve_navigation("primary", Some("fr")).await.unwrap();
    assert_eq!(fr_tree[0].url.as_deref(), Some("/fr/equipe"));

    // Same rule when the requested locale is unknown entirely.
    let de_tree = env.service.resolve_navigation("primary", Some("de")).await.unwrap();
    assert_eq!(de_tree[0].url.as_deref(), Some("/team"));
}

#[tokio::test]
async fn separators_at_the_edges_and_runs_are_dropped() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    // separator, item, separator, separator, item, separator
    env.service
        .add_menu_item(NewMenuItem::new(menu.id, MenuItemType::Separator).position(0))
        .await
        .unwrap();
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home"))
                .position(1),
        )
        .await
        .unwrap();
    env.service
        .add_menu_item(NewMenuItem::new(menu.id, MenuItemType::Separator).position(2))
        .await
        .unwrap();
    env.service
        .add_menu_item(NewMenuItem::new(menu.id, MenuItemType::Separator).position(3))
        .await
        .unwrap();
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("about"))
                .translation(TranslationSpec::label("en", "About"))
                .position(4),
        )
        .await
        .unwrap();
    env.service
        .add_menu_item(NewMenuItem::new(menu.id, MenuItemType::Separator).position(5))
        .await
        .unwrap();

    let tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    let kinds: Vec<MenuItemType> = tree.iter().map(|n| n.node_type).collect();
    assert_eq!(
        kinds,
        vec![
            MenuItemType::Item,
            MenuItemType::Separator,
            MenuItemType::Item
        ]
    );
}

#[tokio::test]
async fn group_title_falls_back_across_locales() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    // Title only in French; the English render falls back to it rather than
    // dropping the group.
    let group = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .translation(TranslationSpec::group_title("fr", "Société")),
        )
        .await
        .unwrap();

    let fr_tree = env.service.resolve_navigation("primary", Some("fr")).await.unwrap();
    assert_eq!(fr_tree.len(), 1);
    assert_eq!(fr_tree[0].id, group.id);
    assert_eq!(fr_tree[0].group_title.as_deref(), Some("Société"));

    let en_tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(en_tree.len(), 1);
    assert_eq!(en_tree[0].group_title.as_deref(), Some("Société"));
}

#[tokio::test]
async fn childless_collapsible_flags_are_forced_off() {
    let env = common::env_with(menu_core::MenuServiceConfig {
        allow_childless_collapsible: true,
        ..Default::default()
    })
    .await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let group = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .translation(TranslationSpec::group_title("en", "Company"))
                .collapsible(true),
        )
        .await
        .unwrap();
    let child = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .parent(ParentLink::Resolved(group.id))
                .target(common::page_target("team"))
                .translation(TranslationSpec::label("en", "Team")),
        )
        .await
        .unwrap();

    let tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert!(tree[0].collapsible);

    // Remove the child; with no children left the flag is forced off.
    env.service.delete_menu_item(&child.id, false).await.unwrap();
    let tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert!(!tree[0].collapsible);
    assert!(!tree[0].collapsed);
}

#[tokio::test]
async fn pending_items_are_excluded_from_the_tree() {
    let env = common::env_with(menu_core::MenuServiceConfig {
        forgiving_bootstrap: true,
        ..Default::default()
    })
    .await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home")),
        )
        .await
        .unwrap();
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .parent(ParentLink::Pending("ghost".to_string()))
                .target(common::page_target("about"))
                .translation(TranslationSpec::label("en", "Orphan")),
        )
        .await
        .unwrap();

    let tree = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].label.as_deref(), Some("Home"));
}
