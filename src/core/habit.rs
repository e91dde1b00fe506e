//! Habit business logic - create, read, list, update and delete habits.
//!
//! Every write goes through [`validate_habit`] and recomputes the habit's
//! next reminder from the caller-supplied `now`. Reading, changing and
//! deleting a single habit is restricted to its owner.

use crate::{
    core::{
        pagination::{Page, page_index},
        schedule::compute_next_reminder,
        validation::{HabitFields, HabitPatch, validate_habit},
    },
    entities::{Habit, habit, user},
    errors::{Error, Result},
};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{QueryOrder, Select, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{debug, info};

/// Finds a habit by id.
pub async fn get_habit<C>(db: &C, habit_id: i64) -> Result<habit::Model>
where
    C: ConnectionTrait,
{
    Habit::find_by_id(habit_id)
        .one(db)
        .await?
        .ok_or(Error::HabitNotFound { id: habit_id })
}

/// Finds a habit and checks that `requester` owns it.
pub async fn get_owned_habit<C>(
    db: &C,
    requester: &user::Model,
    habit_id: i64,
) -> Result<habit::Model>
where
    C: ConnectionTrait,
{
    let found = get_habit(db, habit_id).await?;
    if found.owner_id == Some(requester.id) {
        Ok(found)
    } else {
        Err(Error::AccessDenied { habit_id })
    }
}

/// Loads the habit a write wants to link to.
///
/// A new link may only point at the writer's own habits or public habits; a
/// private habit of someone else is reported as missing. A link the habit
/// already has (`is_new_link == false`) is loaded as is, so it survives its
/// target being made private. `self_id` is the id of the habit being updated,
/// if any, since a habit cannot be its own reward.
async fn resolve_linked_habit<C>(
    db: &C,
    writer: &user::Model,
    linked_habit_id: Option<i64>,
    self_id: Option<i64>,
    is_new_link: bool,
) -> Result<Option<habit::Model>>
where
    C: ConnectionTrait,
{
    let Some(linked_id) = linked_habit_id else {
        return Ok(None);
    };
    if self_id == Some(linked_id) {
        return Err(Error::validation("A habit cannot be linked to itself"));
    }
    Habit::find_by_id(linked_id)
        .one(db)
        .await?
        .filter(|target| {
            !is_new_link || target.owner_id == Some(writer.id) || target.is_public
        })
        .map(Some)
        .ok_or_else(|| Error::validation(format!("Linked habit #{linked_id} does not exist")))
}

/// Creates a habit owned by `owner`.
///
/// The fields are normalized and validated first; nothing is written if a
/// rule is violated. `created_at`, `updated_at` and `next_reminder` are
/// derived from `now`.
pub async fn create_habit<C>(
    db: &C,
    owner: &user::Model,
    fields: HabitFields,
    now: DateTime<FixedOffset>,
) -> Result<habit::Model>
where
    C: ConnectionTrait,
{
    let fields = fields.normalized();
    let linked = resolve_linked_habit(db, owner, fields.linked_habit_id, None, true).await?;
    validate_habit(&fields, linked.as_ref())?;

    let next_reminder = compute_next_reminder(fields.time, fields.frequency, now);
    let timestamp = now.with_timezone(&Utc);

    let new_habit = habit::ActiveModel {
        owner_id: Set(Some(owner.id)),
        place: Set(fields.place),
        time: Set(fields.time),
        action: Set(fields.action),
        is_pleasant: Set(fields.is_pleasant),
        linked_habit_id: Set(fields.linked_habit_id),
        is_good: Set(fields.is_good),
        frequency: Set(fields.frequency),
        reward: Set(fields.reward),
        continuation_time: Set(fields.continuation_time),
        is_public: Set(fields.is_public),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
        next_reminder: Set(Some(next_reminder.with_timezone(&Utc))),
        ..Default::default()
    };

    let created = new_habit.insert(db).await?;
    info!(
        "Created habit #{} for account #{}, next reminder at {}",
        created.id, owner.id, next_reminder
    );
    Ok(created)
}

/// Applies a partial update to a habit owned by `requester`.
///
/// The merged record is validated against the same rules as on create. A
/// pleasant habit that other habits use as their reward must stay pleasant.
pub async fn update_habit<C>(
    db: &C,
    requester: &user::Model,
    habit_id: i64,
    patch: HabitPatch,
    now: DateTime<FixedOffset>,
) -> Result<habit::Model>
where
    C: ConnectionTrait,
{
    let current = get_owned_habit(db, requester, habit_id).await?;
    let fields = patch.apply_to(HabitFields::from(&current)).normalized();

    let is_new_link = fields.linked_habit_id != current.linked_habit_id;
    let linked = resolve_linked_habit(
        db,
        requester,
        fields.linked_habit_id,
        Some(habit_id),
        is_new_link,
    )
    .await?;
    validate_habit(&fields, linked.as_ref())?;

    if current.is_pleasant && !fields.is_pleasant {
        let dependents = Habit::find()
            .filter(habit::Column::LinkedHabitId.eq(habit_id))
            .count(db)
            .await?;
        if dependents > 0 {
            return Err(Error::validation(format!(
                "Habit #{habit_id} is the reward of {dependents} other habit(s) and must stay pleasant"
            )));
        }
    }

    let next_reminder = compute_next_reminder(fields.time, fields.frequency, now);

    let mut active_model: habit::ActiveModel = current.into();
    active_model.place = Set(fields.place);
    active_model.time = Set(fields.time);
    active_model.action = Set(fields.action);
    active_model.is_pleasant = Set(fields.is_pleasant);
    active_model.linked_habit_id = Set(fields.linked_habit_id);
    active_model.is_good = Set(fields.is_good);
    active_model.frequency = Set(fields.frequency);
    active_model.reward = Set(fields.reward);
    active_model.continuation_time = Set(fields.continuation_time);
    active_model.is_public = Set(fields.is_public);
    active_model.updated_at = Set(now.with_timezone(&Utc));
    active_model.next_reminder = Set(Some(next_reminder.with_timezone(&Utc)));

    let updated = active_model.update(db).await?;
    debug!("Updated habit #{}, next reminder at {}", updated.id, next_reminder);
    Ok(updated)
}

/// Deletes a habit owned by `requester`.
///
/// Habits that used it as their reward are unlinked in the same transaction.
pub async fn delete_habit(
    db: &DatabaseConnection,
    requester: &user::Model,
    habit_id: i64,
) -> Result<()> {
    let txn = db.begin().await?;
    get_owned_habit(&txn, requester, habit_id).await?;

    let unlinked = Habit::update_many()
        .col_expr(habit::Column::LinkedHabitId, Expr::value(Option::<i64>::None))
        .filter(habit::Column::LinkedHabitId.eq(habit_id))
        .exec(&txn)
        .await?
        .rows_affected;

    Habit::delete_by_id(habit_id).exec(&txn).await?;
    txn.commit().await?;

    info!("Deleted habit #{habit_id} (unlinked {unlinked} dependent habit(s))");
    Ok(())
}

/// Newest habits first; id breaks ties between habits created in the same instant.
fn newest_first(query: Select<Habit>) -> Select<Habit> {
    query
        .order_by_desc(habit::Column::CreatedAt)
        .order_by_desc(habit::Column::Id)
}

async fn fetch_page<C>(
    db: &C,
    query: Select<Habit>,
    page: u64,
    page_size: u64,
) -> Result<Page<habit::Model>>
where
    C: ConnectionTrait,
{
    let index = page_index(page)?;
    let paginator = newest_first(query).paginate(db, page_size);
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(index).await?;

    Ok(Page {
        items,
        page,
        total_pages: totals.number_of_pages,
        total_items: totals.number_of_items,
    })
}

/// Lists the requester's habits; superusers see every habit.
pub async fn list_habits<C>(
    db: &C,
    requester: &user::Model,
    page: u64,
    page_size: u64,
) -> Result<Page<habit::Model>>
where
    C: ConnectionTrait,
{
    let query = if requester.is_superuser {
        Habit::find()
    } else {
        Habit::find().filter(habit::Column::OwnerId.eq(requester.id))
    };
    fetch_page(db, query, page, page_size).await
}

/// Lists public habits; superusers see every habit.
pub async fn list_public_habits<C>(
    db: &C,
    requester: &user::Model,
    page: u64,
    page_size: u64,
) -> Result<Page<habit::Model>>
where
    C: ConnectionTrait,
{
    let query = if requester.is_superuser {
        Habit::find()
    } else {
        Habit::find().filter(habit::Column::IsPublic.eq(true))
    };
    fetch_page(db, query, page, page_size).await
}

/// Every habit owned by `owner`, newest first, without pagination.
pub async fn list_owned_habits<C>(db: &C, owner: &user::Model) -> Result<Vec<habit::Model>>
where
    C: ConnectionTrait,
{
    newest_first(Habit::find().filter(habit::Column::OwnerId.eq(owner.id)))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the pleasant habits `requester` may link to: their own and public ones.
pub async fn list_linkable_habits<C>(db: &C, requester: &user::Model) -> Result<Vec<habit::Model>>
where
    C: ConnectionTrait,
{
    use sea_orm::Condition;

    newest_first(
        Habit::find()
            .filter(habit::Column::IsPleasant.eq(true))
            .filter(
                Condition::any()
                    .add(habit::Column::OwnerId.eq(requester.id))
                    .add(habit::Column::IsPublic.eq(true)),
            ),
    )
    .all(db)
    .await
    .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_habit_sets_owner_and_schedule() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let now = local_time("2025-10-24T12:00:00+07:00");

        let fields = HabitFields {
            place: Some("Home".to_string()),
            time: time_of_day(17, 35),
            action: Some("Drink a glass of water".to_string()),
            is_good: true,
            frequency: 1,
            reward: Some("Scroll the feed".to_string()),
            continuation_time: 15,
            is_public: true,
            ..HabitFields::default()
        };
        let created = create_habit(&db, &owner, fields, now).await?;

        assert_eq!(created.owner_id, Some(owner.id));
        assert_eq!(created.place.as_deref(), Some("Home"));
        assert_eq!(created.reward.as_deref(), Some("Scroll the feed"));
        assert_eq!(created.linked_habit_id, None);
        assert_eq!(created.created_at, now.with_timezone(&Utc));
        assert_eq!(created.updated_at, now.with_timezone(&Utc));
        assert_eq!(
            in_test_zone(created.next_reminder.unwrap()),
            "2025-10-24T17:35:00+07:00"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_at_its_own_time_schedules_next_period() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let now = local_time("2025-10-24T12:00:00+07:00");

        let fields = HabitFields {
            time: time_of_day(12, 0),
            ..good_habit()
        };
        let created = create_habit(&db, &owner, fields, now).await?;

        assert_eq!(
            in_test_zone(created.next_reminder.unwrap()),
            "2025-10-25T12:00:00+07:00"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_rejects_invalid_without_writing() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;

        let result = create_habit(
            &db,
            &owner,
            HabitFields {
                frequency: 8,
                ..good_habit()
            },
            test_now(),
        )
        .await;

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(Habit::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_link_and_reward_conflict() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let pleasant = create_test_habit(&db, &owner, pleasant_habit()).await?;

        let result = create_habit(
            &db,
            &owner,
            HabitFields {
                reward: Some("tea".to_string()),
                ..linked_to(pleasant.id)
            },
            test_now(),
        )
        .await;

        match result {
            Err(Error::Validation { message }) => {
                assert_eq!(message, "A habit cannot have both a linked habit and a reward");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_link_must_exist_and_be_pleasant() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let good = create_test_habit(&db, &owner, good_habit()).await?;

        let missing = create_habit(&db, &owner, linked_to(999), test_now()).await;
        assert!(matches!(missing, Err(Error::Validation { .. })));

        let not_pleasant = create_habit(&db, &owner, linked_to(good.id), test_now()).await;
        match not_pleasant {
            Err(Error::Validation { message }) => {
                assert_eq!(message, "The linked habit must be a pleasant habit");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_create_habit_cannot_link_private_habit_of_others() -> Result<()> {
        let db = setup_test_db().await?;
        let me = create_test_user(&db, "1", None).await?;
        let other = create_test_user(&db, "2", None).await?;
        let private = create_test_habit(&db, &other, pleasant_habit()).await?;
        let public = create_test_habit(
            &db,
            &other,
            HabitFields {
                is_public: true,
                ..pleasant_habit()
            },
        )
        .await?;

        let rejected = create_habit(&db, &me, linked_to(private.id), test_now()).await;
        assert!(matches!(rejected, Err(Error::Validation { .. })));

        let linked = create_habit(&db, &me, linked_to(public.id), test_now()).await?;
        assert_eq!(linked.linked_habit_id, Some(public.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_kept_link_survives_target_turning_private() -> Result<()> {
        let db = setup_test_db().await?;
        let me = create_test_user(&db, "1", None).await?;
        let other = create_test_user(&db, "2", None).await?;
        let shared = create_test_habit(
            &db,
            &other,
            HabitFields {
                is_public: true,
                ..pleasant_habit()
            },
        )
        .await?;
        let mine = create_test_habit(&db, &me, linked_to(shared.id)).await?;

        let hide = HabitPatch {
            is_public: Some(false),
            ..HabitPatch::default()
        };
        update_habit(&db, &other, shared.id, hide, test_now()).await?;

        let patch = HabitPatch {
            frequency: Some(2),
            ..HabitPatch::default()
        };
        let updated = update_habit(&db, &me, mine.id, patch, test_now()).await?;
        assert_eq!(updated.frequency, 2);
        assert_eq!(updated.linked_habit_id, Some(shared.id));

        // Re-linking to a hidden habit is still a new link and is rejected
        let unlinked = update_habit(
            &db,
            &me,
            mine.id,
            HabitPatch {
                linked_habit_id: Some(None),
                reward: Some(Some("tea".to_string())),
                ..HabitPatch::default()
            },
            test_now(),
        )
        .await?;
        let relink = HabitPatch {
            linked_habit_id: Some(Some(shared.id)),
            reward: Some(None),
            ..HabitPatch::default()
        };
        let result = update_habit(&db, &me, unlinked.id, relink, test_now()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_get_owned_habit_checks_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1", None).await?;
        let stranger = create_test_user(&db, "2", None).await?;
        let admin = create_superuser(&db, "3").await?;
        let owned = create_test_habit(&db, &owner, good_habit()).await?;

        assert_eq!(get_owned_habit(&db, &owner, owned.id).await?.id, owned.id);
        assert!(matches!(
            get_owned_habit(&db, &stranger, owned.id).await,
            Err(Error::AccessDenied { habit_id }) if habit_id == owned.id
        ));
        assert!(matches!(
            get_owned_habit(&db, &admin, owned.id).await,
            Err(Error::AccessDenied { .. })
        ));
        assert!(matches!(
            get_owned_habit(&db, &owner, 404).await,
            Err(Error::HabitNotFound { id: 404 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_habit_partial_and_reschedules() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let created = create_test_habit(&db, &owner, good_habit()).await?;

        let later = local_time("2025-10-25T20:00:00+07:00");
        let patch = HabitPatch {
            time: Some(time_of_day(21, 15)),
            frequency: Some(2),
            place: Some(Some("  Gym ".to_string())),
            ..HabitPatch::default()
        };
        let updated = update_habit(&db, &owner, created.id, patch, later).await?;

        assert_eq!(updated.place.as_deref(), Some("Gym"));
        assert_eq!(updated.frequency, 2);
        assert_eq!(updated.action, created.action);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later.with_timezone(&Utc));
        assert_eq!(
            in_test_zone(updated.next_reminder.unwrap()),
            "2025-10-25T21:15:00+07:00"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_habit_revalidates_merged_record() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let rewarded = create_test_habit(
            &db,
            &owner,
            HabitFields {
                reward: Some("tea".to_string()),
                ..good_habit()
            },
        )
        .await?;

        let patch = HabitPatch {
            is_pleasant: Some(true),
            ..HabitPatch::default()
        };
        let result = update_habit(&db, &owner, rewarded.id, patch, test_now()).await;
        match result {
            Err(Error::Validation { message }) => {
                assert_eq!(message, "A pleasant habit cannot have a reward");
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let stored = get_habit(&db, rewarded.id).await?;
        assert!(!stored.is_pleasant);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_habit_rejected_for_non_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1", None).await?;
        let stranger = create_test_user(&db, "2", None).await?;
        let created = create_test_habit(&db, &owner, good_habit()).await?;

        let patch = HabitPatch {
            frequency: Some(3),
            ..HabitPatch::default()
        };
        let result = update_habit(&db, &stranger, created.id, patch, test_now()).await;
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_reward_habit_must_stay_pleasant_while_linked() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let pleasant = create_test_habit(&db, &owner, pleasant_habit()).await?;
        create_test_habit(&db, &owner, linked_to(pleasant.id)).await?;

        let patch = HabitPatch {
            is_pleasant: Some(false),
            is_good: Some(true),
            ..HabitPatch::default()
        };
        let result = update_habit(&db, &owner, pleasant.id, patch, test_now()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_habit_cannot_link_itself() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let created = create_test_habit(&db, &owner, good_habit()).await?;

        let patch = HabitPatch {
            linked_habit_id: Some(Some(created.id)),
            ..HabitPatch::default()
        };
        let result = update_habit(&db, &owner, created.id, patch, test_now()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_habit_unlinks_dependents() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1001", None).await?;
        let pleasant = create_test_habit(&db, &owner, pleasant_habit()).await?;
        let dependent = create_test_habit(&db, &owner, linked_to(pleasant.id)).await?;

        delete_habit(&db, &owner, pleasant.id).await?;

        assert!(matches!(
            get_habit(&db, pleasant.id).await,
            Err(Error::HabitNotFound { .. })
        ));
        let dependent = get_habit(&db, dependent.id).await?;
        assert_eq!(dependent.linked_habit_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_habit_rejected_for_non_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1", None).await?;
        let stranger = create_test_user(&db, "2", None).await?;
        let created = create_test_habit(&db, &owner, good_habit()).await?;

        let result = delete_habit(&db, &stranger, created.id).await;
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
        assert!(get_habit(&db, created.id).await.is_ok());

        let missing = delete_habit(&db, &owner, 404).await;
        assert!(matches!(missing, Err(Error::HabitNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_habits_scoped_to_owner_and_paginated() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1", None).await?;
        let other = create_test_user(&db, "2", None).await?;
        let admin = create_superuser(&db, "3").await?;

        let mut created_ids = Vec::new();
        for _ in 0..7 {
            created_ids.push(create_test_habit(&db, &owner, good_habit()).await?.id);
        }
        create_test_habit(&db, &other, good_habit()).await?;

        let first = list_habits(&db, &owner, 1, 5).await?;
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_items, 7);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next());
        assert!(first.items.iter().all(|h| h.owner_id == Some(owner.id)));
        assert_eq!(first.items[0].id, *created_ids.last().unwrap());

        let second = list_habits(&db, &owner, 2, 5).await?;
        assert_eq!(second.items.len(), 2);
        assert!(!second.has_next());

        let beyond = list_habits(&db, &owner, 3, 5).await?;
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 7);

        let everything = list_habits(&db, &admin, 1, 5).await?;
        assert_eq!(everything.total_items, 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_public_habits() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "1", None).await?;
        let viewer = create_test_user(&db, "2", None).await?;
        let admin = create_superuser(&db, "3").await?;

        create_test_habit(&db, &owner, good_habit()).await?;
        let public = create_test_habit(
            &db,
            &owner,
            HabitFields {
                is_public: true,
                ..good_habit()
            },
        )
        .await?;

        let visible = list_public_habits(&db, &viewer, 1, 5).await?;
        assert_eq!(visible.total_items, 1);
        assert_eq!(visible.items[0].id, public.id);

        let all = list_public_habits(&db, &admin, 1, 5).await?;
        assert_eq!(all.total_items, 2);

        assert!(matches!(
            list_public_habits(&db, &viewer, 0, 5).await,
            Err(Error::Validation { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_linkable_habits() -> Result<()> {
        let db = setup_test_db().await?;
        let me = create_test_user(&db, "1", None).await?;
        let other = create_test_user(&db, "2", None).await?;

        let mine = create_test_habit(&db, &me, pleasant_habit()).await?;
        let shared = create_test_habit(
            &db,
            &other,
            HabitFields {
                is_public: true,
                ..pleasant_habit()
            },
        )
        .await?;
        create_test_habit(&db, &other, pleasant_habit()).await?;
        create_test_habit(&db, &me, good_habit()).await?;

        let mut ids: Vec<i64> = list_linkable_habits(&db, &me)
            .await?
            .into_iter()
            .map(|h| h.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![mine.id, shared.id]);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_owned_habits_ignores_superuser_scope() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_superuser(&db, "1").await?;
        let other = create_test_user(&db, "2", None).await?;

        let own = create_test_habit(&db, &admin, good_habit()).await?;
        create_test_habit(&db, &other, good_habit()).await?;

        let ids: Vec<i64> = list_owned_habits(&db, &admin)
            .await?
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, vec![own.id]);
        Ok(())
    }
}
