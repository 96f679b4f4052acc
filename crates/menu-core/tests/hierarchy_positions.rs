//! Sibling position maintenance under insert, move and delete.

mod common;

use menu_core::domain::MenuItemType;
use menu_core::repositories::MenuItemRepository;
use menu_core::{DomainError, MenuItemUpdate, NewMenu, NewMenuItem, TranslationSpec};

#[tokio::test]
async fn inserting_at_zero_shifts_existing_siblings() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let a = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home"))
                .position(0),
        )
        .await
        .unwrap();
    let b = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("about"))
                .translation(TranslationSpec::label("en", "About"))
                .position(0),
        )
        .await
        .unwrap();

    let a_after = env.items.find_by_id(&a.id).await.unwrap().unwrap();
    let b_after = env.items.find_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(b_after.position, 0);
    assert_eq!(a_after.position, 1);
}

#[tokio::test]
async fn requested_position_is_clamped_to_the_sibling_count() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let item = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home"))
                .position(500),
        )
        .await
        .unwrap();
    assert_eq!(item.position, 0);
}

#[tokio::test]
async fn negative_position_is_rejected() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let result = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .target(common::page_target("home"))
                .translation(TranslationSpec::label("en", "Home"))
                .position(-2),
        )
        .await;
    assert!(matches!(result, Err(DomainError::InvalidPosition(-2))));
}

#[tokio::test]
async fn deleting_a_middle_sibling_compacts_positions() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut ids = Vec::new();
    for slug in ["home", "about", "team"] {
        let item = env
            .service
            .add_menu_item(
                NewMenuItem::new(menu.id, MenuItemType::Item)
                    .target(common::page_target(slug))
                    .translation(TranslationSpec::label("en", slug)),
            )
            .await
            .unwrap();
        ids.push(item.id);
    }

    env.service.delete_menu_item(&ids[1], false).await.unwrap();

    let first = env.items.find_by_id(&ids[0]).await.unwrap().unwrap();
    let last = env.items.find_by_id(&ids[2]).await.unwrap().unwrap();
    assert_eq!(first.position, 0);
    assert_eq!(last.position, 1);
}

#[tokio::test]
async fn repositioning_renumbers_only_what_moved() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut ids = Vec::new();
    for slug in ["home", "about", "team"] {
        let item = env
            .service
            .add_menu_item(
                NewMenuItem::new(menu.id, MenuItemType::Item)
                    .target(common::page_target(slug))
                    .translation(TranslationSpec::label("en", slug)),
            )
            .await
            .unwrap();
        ids.push(item.id);
    }

    // Move the last item to the front.
    let moved = env
        .service
        .update_menu_item(
            &ids[2],
            MenuItemUpdate {
                position: Some(0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.position, 0);

    let home = env.items.find_by_id(&ids[0]).await.unwrap().unwrap();
    let about = env.items.find_by_id(&ids[1]).await.unwrap().unwrap();
    assert_eq!(home.position, 1);
    assert_eq!(about.position, 2);
}

#[tokio::test]
async fn delete_without_cascade_fails_while_children_exist() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let group = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .translation(TranslationSpec::group_title("en", "Company")),
        )
        .await
        .unwrap();
    env.service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .parent(menu_core::domain::ParentLink::Resolved(group.id))
                .target(common::page_target("team"))
                .translation(TranslationSpec::label("en", "Team")),
        )
        .await
        .unwrap();

    let blocked = env.service.delete_menu_item(&group.id, false).await;
    assert!(matches!(blocked, Err(DomainError::ChildrenExist(id)) if id == group.id));

    // Cascade removes the whole subtree.
    env.service.delete_menu_item(&group.id, true).await.unwrap();
    let remaining = env.items.list_by_menu(&menu.id).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn reparenting_onto_a_pending_ref_leaves_root_positions_alone() {
    let env = common::env_with(menu_core::MenuServiceConfig {
        forgiving_bootstrap: true,
        ..Default::default()
    })
    .await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let mut roots = Vec::new();
    for slug in ["home", "about", "team"] {
        let item = env
            .service
            .add_menu_item(
                NewMenuItem::new(menu.id, MenuItemType::Item)
                    .target(common::page_target(slug))
                    .translation(TranslationSpec::label("en", slug)),
            )
            .await
            .unwrap();
        roots.push(item.id);
    }
    let group = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .translation(TranslationSpec::group_title("en", "Company")),
        )
        .await
        .unwrap();
    let child = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Item)
                .parent(menu_core::domain::ParentLink::Resolved(group.id))
                .target(common::page_target("about"))
                .translation(TranslationSpec::label("en", "About")),
        )
        .await
        .unwrap();

    let moved = env
        .service
        .update_menu_item(
            &child.id,
            MenuItemUpdate {
                parent: Some(menu_core::domain::ParentLink::Pending("future".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(moved.parent.is_pending());

    // The root run stays exactly as it was.
    for (rank, id) in roots.iter().enumerate() {
        let root = env.items.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(root.position, rank as i32);
    }
    let group_after = env.items.find_by_id(&group.id).await.unwrap().unwrap();
    assert_eq!(group_after.position, 3);
}

#[tokio::test]
async fn reparenting_under_own_descendant_is_rejected() {
    let env = common::env().await;
    let menu = env.service.create_menu(NewMenu::new("primary")).await.unwrap();

    let parent = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .translation(TranslationSpec::group_title("en", "Company")),
        )
        .await
        .unwrap();
    let child = env
        .service
        .add_menu_item(
            NewMenuItem::new(menu.id, MenuItemType::Group)
                .parent(menu_core::domain::ParentLink::Resolved(parent.id))
                .translation(TranslationSpec::group_title("en", "Offices")),
        )
        .await
        .unwrap();

    let result = env
        .service
        .update_menu_item(
            &parent.id,
            MenuItemUpdate {
                parent: Some(menu_core::domain::ParentLink::Resolved(child.id)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::HierarchyCycle(_))));
}
