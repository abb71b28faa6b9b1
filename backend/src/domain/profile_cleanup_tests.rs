//! Tests for the shadow profile cleanup saga.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;

use super::*;
use crate::domain::ports::{
    MockShadowProfileLinks, MockShadowProfileLookup, MockShadowProfileStore,
    ShadowProfileLinksError, ShadowProfileStoreError,
};
use crate::domain::{CompletionStatus, PublishVersion, Zuid};

fn zuid(value: &str) -> Zuid {
    Zuid::new(value).expect("fixture zuid")
}

fn profile(item: &str) -> ShadowProfileRef {
    ShadowProfileRef {
        model_zuid: zuid("6-staff"),
        item_zuid: zuid(item),
    }
}

fn version(id: &str, hour: u32) -> PublishVersion {
    PublishVersion {
        zuid: zuid(id),
        updated_at: Utc
            .with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

fn email() -> EmailAddress {
    EmailAddress::new("jane@x.io").expect("fixture email")
}

fn cleanup(
    store: MockShadowProfileStore,
    links: MockShadowProfileLinks,
    lookup: MockShadowProfileLookup,
) -> ShadowProfileCleanup<MockShadowProfileStore, MockShadowProfileLinks, MockShadowProfileLookup>
{
    ShadowProfileCleanup::new(Arc::new(store), Arc::new(links), Arc::new(lookup))
}

#[tokio::test]
async fn linked_profile_is_unpublished_then_deleted_without_lookup() {
    let mut links = MockShadowProfileLinks::new();
    links
        .expect_take()
        .times(1)
        .return_once(|_| Ok(vec![profile("7-item-1")]));
    let mut lookup = MockShadowProfileLookup::new();
    lookup.expect_find_profiles().times(0);

    let mut store = MockShadowProfileStore::new();
    store
        .expect_list_publishings()
        .times(1)
        .return_once(|_| Ok(vec![version("9-old", 8), version("9-new", 12), version("9-mid", 10)]));
    store
        .expect_unpublish()
        .withf(|target, version| target.item_zuid.as_str() == "7-item-1" && version.as_str() == "9-new")
        .times(1)
        .return_once(|_, _| Ok(()));
    store
        .expect_delete_profile()
        .with(eq(profile("7-item-1")))
        .times(1)
        .return_once(|_| Ok(()));

    let outcome = cleanup(store, links, lookup).run("Jane Roe", &email()).await;

    assert_eq!(outcome.status(), CompletionStatus::Complete);
    assert_eq!(outcome.value().deleted, vec![profile("7-item-1")]);
}

#[tokio::test]
async fn falls_back_to_lookup_when_nothing_is_linked() {
    let mut links = MockShadowProfileLinks::new();
    links.expect_take().times(1).return_once(|_| Ok(Vec::new()));
    let mut lookup = MockShadowProfileLookup::new();
    lookup
        .expect_find_profiles()
        .withf(|name, email| name == "Jane Roe" && email.as_str() == "jane@x.io")
        .times(1)
        .return_once(|_, _| Ok(vec![profile("7-a"), profile("7-b")]));

    let mut store = MockShadowProfileStore::new();
    store
        .expect_list_publishings()
        .times(2)
        .returning(|_| Ok(Vec::new()));
    store.expect_unpublish().times(0);
    store.expect_delete_profile().times(2).returning(|_| Ok(()));

    let outcome = cleanup(store, links, lookup).run("Jane Roe", &email()).await;

    assert_eq!(outcome.status(), CompletionStatus::Complete);
    assert_eq!(outcome.value().deleted.len(), 2);
}

#[tokio::test]
async fn unpublish_failure_is_recorded_but_delete_proceeds() {
    let mut links = MockShadowProfileLinks::new();
    links
        .expect_take()
        .return_once(|_| Ok(vec![profile("7-item-1")]));
    let mut store = MockShadowProfileStore::new();
    store
        .expect_list_publishings()
        .return_once(|_| Ok(vec![version("9-only", 9)]));
    store
        .expect_unpublish()
        .return_once(|_, _| Err(ShadowProfileStoreError::rejected(500_u16, "boom")));
    store.expect_delete_profile().times(1).return_once(|_| Ok(()));

    let outcome = cleanup(store, links, MockShadowProfileLookup::new())
        .run("Jane Roe", &email())
        .await;

    assert_eq!(outcome.status(), CompletionStatus::Partial);
    assert_eq!(outcome.value().deleted.len(), 1);
    let failure = outcome.failures().first().expect("one failure");
    assert_eq!(failure.step, LifecycleStep::UnpublishShadowProfile);
    assert_eq!(failure.target, Some(profile("7-item-1")));
}

#[tokio::test]
async fn delete_failure_restores_link_for_retry() {
    let mut links = MockShadowProfileLinks::new();
    links
        .expect_take()
        .return_once(|_| Ok(vec![profile("7-item-1")]));
    links
        .expect_record()
        .withf(|email, target| email.as_str() == "jane@x.io" && target.item_zuid.as_str() == "7-item-1")
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut store = MockShadowProfileStore::new();
    store.expect_list_publishings().return_once(|_| Ok(Vec::new()));
    store
        .expect_delete_profile()
        .return_once(|_| Err(ShadowProfileStoreError::timeout("deadline elapsed")));

    let outcome = cleanup(store, links, MockShadowProfileLookup::new())
        .run("Jane Roe", &email())
        .await;

    assert_eq!(outcome.status(), CompletionStatus::Partial);
    assert!(outcome.value().deleted.is_empty());
    assert_eq!(
        outcome.failures().first().map(|failure| failure.step),
        Some(LifecycleStep::DeleteShadowProfile)
    );
}

#[tokio::test]
async fn lookup_failure_is_reported_as_locate_step() {
    let mut links = MockShadowProfileLinks::new();
    links
        .expect_take()
        .return_once(|_| Err(ShadowProfileLinksError::storage("poisoned")));
    let mut lookup = MockShadowProfileLookup::new();
    lookup
        .expect_find_profiles()
        .return_once(|_, _| Err(ShadowProfileStoreError::transport("dns failure")));
    let mut store = MockShadowProfileStore::new();
    store.expect_delete_profile().times(0);

    let outcome = cleanup(store, links, lookup).run("Jane Roe", &email()).await;

    assert_eq!(outcome.status(), CompletionStatus::Partial);
    let failure = outcome.failures().first().expect("one failure");
    assert_eq!(failure.step, LifecycleStep::LocateShadowProfile);
    assert!(failure.target.is_none());
}

#[tokio::test]
async fn nothing_found_completes_without_deletions() {
    let mut links = MockShadowProfileLinks::new();
    links.expect_take().return_once(|_| Ok(Vec::new()));
    let mut lookup = MockShadowProfileLookup::new();
    lookup.expect_find_profiles().return_once(|_, _| Ok(Vec::new()));

    let outcome = cleanup(MockShadowProfileStore::new(), links, lookup)
        .run("Jane Roe", &email())
        .await;

    assert_eq!(outcome.status(), CompletionStatus::Complete);
    assert!(outcome.value().deleted.is_empty());
}
