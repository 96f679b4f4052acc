//! Idempotent add: repeated bootstrap runs merge instead of duplicating.

mod common;

use menu_core::domain::MenuItemType;
use menu_core::repositories::{LocaleRepository, MenuItemTranslationRepository};
use menu_core::{ActivityEvent, NewMenu, NewMenuItem, TranslationSpec};

#[tokio::test]
async fn adding_the_same_target_twice_yields_one_item() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let first = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home")),
        )
        .await
        .unwrap();

    let second = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home")),
        )
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    let all = env.service.resolve_navigation("primary", Some("en")).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn dedupe_merges_new_locales_without_touching_existing_ones() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let item = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home")),
        )
        .await
        .unwrap();

    // Second run carries a conflicting English label and a new French one.
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Start"))
                .translation(TranslationSpec::label("fr", "Accueil")),
        )
        .await
        .unwrap();

    let en = env.locales.find_by_code("en").await.unwrap().unwrap();
    let fr = env.locales.find_by_code("fr").await.unwrap().unwrap();

    let en_translation = env
        .translations
        .find_by_item_and_locale(&item.id, &en.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(en_translation.label.as_deref(), Some("Home"));

    let fr_translation = env
        .translations
        .find_by_item_and_locale(&item.id, &fr.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fr_translation.label.as_deref(), Some("Accueil"));

    let events = env.activity.events().await;
    assert!(events
        .iter()
        .any(|e| matches!(e, ActivityEvent::ItemMerged { merged_locales: 1, .. })));
}

#[tokio::test]
async fn external_code_dedupes_case_insensitively() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let first = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .external_code("Team")
                .target(common::page_target("team"))
                .translation(TranslationSpec::label("en", "Team")),
        )
        .await
        .unwrap();

    let second = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .external_code("TEAM")
                .target(common::page_target("team"))
                .translation(TranslationSpec::label("fr", "Équipe")),
        )
        .await
        .unwrap();

    assert_eq!(first.id, second.id);

    let found = env
        .service
        .find_item_by_external_code(&menu.id, "teAM")
        .await
        .unwrap();
    assert_eq!(found.map(|it| it.id), Some(first.id));
}

#[tokio::test]
async fn caller_supplied_id_wins_over_strategy() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let wanted = uuid::Uuid::new_v4();
    let mut input = NewMenuItem::new(menu.id, MenuItemType::Item)
        .target(common::page_target("home"))
        .translation(TranslationSpec::label("en", "Home"));
    input.id = Some(wanted);

    let created = env.service.add_menu_item(input).await.unwrap();
    assert_eq!(created.id, wanted);
}
