//! Field patches: `update_menu` and `update_translation`.

mod common;

use menu_core::domain::MenuItemType;
use menu_core::repositories::{LocaleRepository, MenuItemTranslationRepository};
use menu_core::{DomainError, MenuUpdate, NewMenu, NewMenuItem, TranslationSpec};

#[tokio::test]
async fn update_menu_patches_only_the_provided_fields() {
    let env = common::env().await;
    let menu = env
        .service
        .create_menu(NewMenu::new("primary").description("Main navigation"))
        .await
        .unwrap();

    let updated = env
        .service
        .update_menu(
            &menu.id,
            MenuUpdate {
                code: Some(" header ".to_string()),
                location: Some("top".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.code, "header");
    assert_eq!(updated.location.as_deref(), Some("top"));
    assert_eq!(updated.description.as_deref(), Some("Main navigation"));
    assert!(updated.modified_at.is_some());

    assert!(env.service.find_menu_by_code("primary").await.unwrap().is_none());
    let found = env.service.find_menu_by_code("header").await.unwrap();
    assert_eq!(found.map(|m| m.id), Some(menu.id));

    // A blank value clears an optional field.
    let cleared = env
        .service
        .update_menu(
            &menu.id,
            MenuUpdate {
                description: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.location.as_deref(), Some("top"));
}

#[tokio::test]
async fn update_menu_rejects_a_taken_or_malformed_code() {
    let env = common::env().await;
    env.service.create_menu(NewMenu::new("primary")).await.unwrap();
    let other = env.service.create_menu(NewMenu::new("footer")).await.unwrap();

    let taken = env
        .service
        .update_menu(
            &other.id,
            MenuUpdate {
                code: Some("primary".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(taken, Err(DomainError::MenuCodeAlreadyExists(code)) if code == "primary"));

    let malformed = env
        .service
        .update_menu(
            &other.id,
            MenuUpdate {
                code: Some("side bar!".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(malformed, Err(DomainError::InvalidMenuCode(_))));

    // Keeping your own code is not a conflict.
    let kept = env
        .service
        .update_menu(
            &other.id,
            MenuUpdate {
                code: Some("footer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.code, "footer");
}

#[tokio::test]
async fn update_menu_requires_an_existing_menu() {
    let env = common::env().await;

    let missing = uuid::Uuid::new_v4();
    let result = env
        .service
        .update_menu(&missing, MenuUpdate::default())
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound { resource: "menu", .. })
    ));
}

#[tokio::test]
async fn update_translation_replaces_the_locale_fields() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut original = TranslationSpec::label("en", "Home");
    original.label_key = Some("nav.home".to_string());
    let item = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(original),
        )
        .await
        .unwrap();

    let updated = env
        .service
        .update_translation(&item.id, TranslationSpec::label("en", "  Start  "), None)
        .await
        .unwrap();

    // The patch is whole-translation: the label is trimmed and the old
    // label key, absent from the request, is cleared.
    assert_eq!(updated.label.as_deref(), Some("Start"));
    assert_eq!(updated.label_key, None);
    assert!(updated.modified_at.is_some());

    let en = env.locales.find_by_code("en").await.unwrap().unwrap();
    let stored = env
        .translations
        .find_by_item_and_locale(&item.id, &en.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.label.as_deref(), Some("Start"));
}

#[tokio::test]
async fn update_translation_requires_an_existing_row_and_some_text() {
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

    // No French translation exists to patch.
    let missing = env
        .service
        .update_translation(&item.id, TranslationSpec::label("fr", "Accueil"), None)
        .await;
    assert!(matches!(
        missing,
        Err(DomainError::NotFound { resource: "translation", .. })
    ));

    let unknown_locale = env
        .service
        .update_translation(&item.id, TranslationSpec::label("de", "Startseite"), None)
        .await;
    assert!(matches!(
        unknown_locale,
        Err(DomainError::NotFound { resource: "locale", .. })
    ));

    let empty = TranslationSpec {
        locale: "en".to_string(),
        ..Default::default()
    };
    let no_text = env.service.update_translation(&item.id, empty, None).await;
    assert!(matches!(no_text, Err(DomainError::TranslationTextRequired)));
}
