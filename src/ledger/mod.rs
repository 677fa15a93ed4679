mod carpool;
mod names;
mod store;

#[cfg(test)]
mod memory_store;

use std::sync::Arc;

use poise::serenity_prelude::UserId;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    types::UtcDateTime, Capacity, CarpoolEntryId, Game, GameId, NewCarpoolEntry, NewRegistration,
    RoleId, UserRegistration,
};

pub use carpool::{available_drivers, pending_requests, remaining_seats};
pub use names::parse_names;
pub use store::{CommitOutcome, GameCommit, GameStore, IndexWrite, StoreError, VersionedGame};

/// Attempts of one operation before giving up on a busy game.
pub const MAX_ATTEMPTS: usize = 5;

/// Who is writing. Members get their registrations mirrored in the index; guests
/// (names typed in by an admin) don't.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registrant {
    Member(UserId),
    Guest,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Game {0} not found")]
    GameNotFound(GameId),
    #[error("Role {0} not found")]
    RoleNotFound(RoleId),
    #[error("Volunteer `{0}` not found")]
    VolunteerNotFound(String),
    #[error("Carpool entry {0} not found")]
    CarpoolEntryNotFound(CarpoolEntryId),
    #[error("Role {role} is full ({capacity} slots)")]
    RoleFull { role: String, capacity: Capacity },
    #[error("No name given")]
    EmptyName,
    #[error("Not enough seats: {remaining} left, {needed} needed")]
    NotEnoughSeats { remaining: u32, needed: u32 },
    #[error("Carpool entry {0} belongs to someone else")]
    NotOwner(CarpoolEntryId),
    #[error("Game {0} kept changing, gave up after {MAX_ATTEMPTS} attempts")]
    Contention(GameId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Old and new names are the same.
    Unchanged,
    /// One name replaced in place.
    Replaced,
    /// One entry split into several people.
    Split(Vec<String>),
}

/// Working copy of one game inside a transaction attempt.
pub struct Draft {
    original: Game,
    pub game: Game,
    pub registrant: Registrant,
    /// Every member's registrations on this game.
    pub registrations: Vec<UserRegistration>,
    pub index_writes: Vec<IndexWrite>,
    pub now: UtcDateTime,
}

impl Draft {
    fn is_dirty(&self) -> bool {
        self.game != self.original || !self.index_writes.is_empty()
    }

    fn mirror_insert(&mut self, role_id: RoleId, volunteer_name: &str) {
        if let Registrant::Member(member) = self.registrant {
            self.index_writes.push(IndexWrite::Insert(NewRegistration::for_role(
                member,
                &self.game,
                role_id,
                volunteer_name,
                self.now,
            )));
        }
    }

    /// Takes the registration behind this name out of the draft, so two entries
    /// with the same name map to two registrations. The registrant's own comes
    /// first, then whoever else signed up under that name.
    fn take_registration(
        &mut self,
        role_id: RoleId,
        volunteer_name: &str,
    ) -> Option<UserRegistration> {
        let matches = |registration: &UserRegistration| {
            registration.role_id == role_id && registration.volunteer_name == volunteer_name
        };

        let own = match self.registrant {
            Registrant::Member(member) => self
                .registrations
                .iter()
                .position(|registration| registration.member == member && matches(registration)),
            Registrant::Guest => None,
        };

        let position = own.or_else(|| self.registrations.iter().position(matches))?;
        Some(self.registrations.remove(position))
    }
}

/// Applies volunteer and carpool changes to one game at a time, with optimistic
/// retries against concurrent writers.
pub struct RegistrationLedger<S: GameStore> {
    store: Arc<S>,
    strict_capacity: bool,
}

impl<S: GameStore> RegistrationLedger<S> {
    pub fn new(store: Arc<S>, strict_capacity: bool) -> RegistrationLedger<S> {
        RegistrationLedger {
            store,
            strict_capacity,
        }
    }

    async fn transact<T, F>(
        &self,
        game_id: GameId,
        registrant: Registrant,
        mut mutate: F,
    ) -> Result<T, LedgerError>
    where
        T: Send,
        F: FnMut(&mut Draft) -> Result<T, LedgerError> + Send,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            let VersionedGame { game, version } = self
                .store
                .load_game(game_id)
                .await?
                .ok_or(LedgerError::GameNotFound(game_id))?;

            let registrations = self.store.load_registrations(game_id).await?;

            let mut draft = Draft {
                original: game.clone(),
                game,
                registrant,
                registrations,
                index_writes: Vec::new(),
                now: UtcDateTime::now(),
            };

            let value = mutate(&mut draft)?;

            if !draft.is_dirty() {
                debug!("Nothing changed on game {game_id}");
                return Ok(value);
            }

            let commit = GameCommit {
                game: draft.game,
                expected_version: version,
                index_writes: draft.index_writes,
            };

            match self.store.commit(commit).await? {
                CommitOutcome::Committed => {
                    info!("Committed game {game_id} on attempt {attempt}");
                    return Ok(value);
                }
                CommitOutcome::Conflict => {
                    debug!("Write conflict on game {game_id} (attempt {attempt}), retrying");
                }
            }
        }

        warn!("Giving up on game {game_id} after {MAX_ATTEMPTS} conflicting attempts");
        Err(LedgerError::Contention(game_id))
    }

    /// Appends every name found in `names` to the role. Returns the names added.
    #[tracing::instrument(skip(self))]
    pub async fn sign_up(
        &self,
        game_id: GameId,
        role_id: RoleId,
        names: &str,
        registrant: Registrant,
    ) -> Result<Vec<String>, LedgerError> {
        let names = parse_names(names);
        if names.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let strict_capacity = self.strict_capacity;

        self.transact(game_id, registrant, |draft| {
            let role = draft
                .game
                .role_mut(role_id)
                .ok_or(LedgerError::RoleNotFound(role_id))?;

            if strict_capacity && !role.has_room_for(names.len()) {
                return Err(LedgerError::RoleFull {
                    role: role.name.clone(),
                    capacity: role.capacity,
                });
            }

            role.volunteers.extend(names.iter().cloned());

            for name in &names {
                draft.mirror_insert(role_id, name);
            }

            Ok(names.clone())
        })
        .await
    }

    /// Removes the first entry equal to `name`. Returns false when it wasn't there.
    #[tracing::instrument(skip(self))]
    pub async fn withdraw(
        &self,
        game_id: GameId,
        role_id: RoleId,
        name: &str,
        registrant: Registrant,
    ) -> Result<bool, LedgerError> {
        let name = name.trim();

        self.transact(game_id, registrant, |draft| {
            let role = draft
                .game
                .role_mut(role_id)
                .ok_or(LedgerError::RoleNotFound(role_id))?;

            let Some(position) = role.volunteers.iter().position(|v| v == name) else {
                return Ok(false);
            };
            role.volunteers.remove(position);

            if let Some(registration) = draft.take_registration(role_id, name) {
                draft.index_writes.push(IndexWrite::Delete(registration.id));
            }

            Ok(true)
        })
        .await
    }

    /// Replaces `old_name`. A single new name is replaced in place; several names
    /// replace the entry with one entry (and registration) per person.
    #[tracing::instrument(skip(self))]
    pub async fn rename(
        &self,
        game_id: GameId,
        role_id: RoleId,
        old_name: &str,
        new_names: &str,
        registrant: Registrant,
    ) -> Result<RenameOutcome, LedgerError> {
        let old_name = old_name.trim();
        let new_names = parse_names(new_names);
        if new_names.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let strict_capacity = self.strict_capacity;

        self.transact(game_id, registrant, |draft| {
            let role = draft
                .game
                .role_mut(role_id)
                .ok_or(LedgerError::RoleNotFound(role_id))?;

            let position = role
                .volunteers
                .iter()
                .position(|v| v == old_name)
                .ok_or_else(|| LedgerError::VolunteerNotFound(old_name.to_string()))?;

            if let [new_name] = new_names.as_slice() {
                if new_name == old_name {
                    return Ok(RenameOutcome::Unchanged);
                }

                role.volunteers[position] = new_name.clone();

                if let Some(registration) = draft.take_registration(role_id, old_name) {
                    draft.index_writes.push(IndexWrite::Rename {
                        id: registration.id,
                        volunteer_name: new_name.clone(),
                    });
                }

                return Ok(RenameOutcome::Replaced);
            }

            if strict_capacity && !role.has_room_for(new_names.len() - 1) {
                return Err(LedgerError::RoleFull {
                    role: role.name.clone(),
                    capacity: role.capacity,
                });
            }

            role.volunteers.remove(position);
            role.volunteers.extend(new_names.iter().cloned());

            if let Some(registration) = draft.take_registration(role_id, old_name) {
                draft.index_writes.push(IndexWrite::Delete(registration.id));
            }
            for name in &new_names {
                draft.mirror_insert(role_id, name);
            }

            Ok(RenameOutcome::Split(new_names.clone()))
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_capacity(
        &self,
        game_id: GameId,
        role_id: RoleId,
        capacity: Capacity,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            let role = draft
                .game
                .role_mut(role_id)
                .ok_or(LedgerError::RoleNotFound(role_id))?;
            role.capacity = capacity;
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_carpool(
        &self,
        game_id: GameId,
        entry: NewCarpoolEntry,
    ) -> Result<CarpoolEntryId, LedgerError> {
        if entry.name.trim().is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let id = CarpoolEntryId::generate();

        self.transact(game_id, Registrant::Guest, |draft| {
            draft.game.carpool.push(entry.clone().into_entry(id.clone()));
            Ok(id.clone())
        })
        .await
    }

    /// Removes an entry. With `requester` set, only their own entries can go;
    /// without, any entry (admin).
    #[tracing::instrument(skip(self))]
    pub async fn remove_carpool(
        &self,
        game_id: GameId,
        entry_id: &CarpoolEntryId,
        requester: Option<(UserId, &str)>,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            let entry = draft
                .game
                .carpool
                .iter()
                .find(|entry| entry.id == *entry_id)
                .ok_or_else(|| LedgerError::CarpoolEntryNotFound(entry_id.clone()))?;

            if let Some((user, display_name)) = requester {
                if !entry.is_owned_by(user, display_name) {
                    return Err(LedgerError::NotOwner(entry_id.clone()));
                }
            }

            carpool::remove(&mut draft.game.carpool, entry_id);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn request_seat(
        &self,
        game_id: GameId,
        passenger: &CarpoolEntryId,
        driver: &CarpoolEntryId,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            carpool::request_seat(&mut draft.game.carpool, passenger, driver)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn accept_passenger(
        &self,
        game_id: GameId,
        driver: &CarpoolEntryId,
        passenger: &CarpoolEntryId,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            carpool::accept_passenger(&mut draft.game.carpool, driver, passenger)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn reject_passenger(
        &self,
        game_id: GameId,
        driver: &CarpoolEntryId,
        passenger: &CarpoolEntryId,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            carpool::reject_passenger(&mut draft.game.carpool, driver, passenger)
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_request(
        &self,
        game_id: GameId,
        passenger: &CarpoolEntryId,
    ) -> Result<(), LedgerError> {
        self.transact(game_id, Registrant::Guest, |draft| {
            carpool::cancel_request(&mut draft.game.carpool, passenger)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poise::serenity_prelude::UserId;

    use crate::models::{Capacity, CarpoolKind, GameId, NewCarpoolEntry, RoleId};

    use super::{
        memory_store::MemoryStore, IndexWrite, LedgerError, Registrant, RegistrationLedger,
        RenameOutcome,
    };

    const BUVETTE: RoleId = RoleId(1);
    const CHRONO: RoleId = RoleId(2);

    fn member() -> Registrant {
        Registrant::Member(UserId::new(42))
    }

    fn ledger(store: &Arc<MemoryStore>, strict: bool) -> RegistrationLedger<MemoryStore> {
        RegistrationLedger::new(store.clone(), strict)
    }

    #[test_log::test(tokio::test)]
    async fn sign_up_writes_one_registration_per_name() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);

        let added = ledger
            .sign_up(GameId(1), BUVETTE, "Marie et Paul", member())
            .await
            .unwrap();

        assert_eq!(added, vec!["Marie", "Paul"]);
        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["Marie", "Paul"]);
        assert_eq!(
            store
                .registrations()
                .iter()
                .map(|r| r.volunteer_name.as_str())
                .collect::<Vec<_>>(),
            vec!["Marie", "Paul"]
        );
    }

    #[test_log::test(tokio::test)]
    async fn guest_sign_up_has_no_mirror() {
        let store = Arc::new(MemoryStore::with_game());

        ledger(&store, false)
            .sign_up(GameId(1), BUVETTE, "Léo", Registrant::Guest)
            .await
            .unwrap();

        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["Léo"]);
        assert!(store.registrations().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn concurrent_sign_ups_retry_instead_of_losing_a_write() {
        let store = Arc::new(MemoryStore::with_game().interleaving());
        let first = ledger(&store, false);
        let second = ledger(&store, false);

        let (a, b) = tokio::join!(
            first.sign_up(GameId(1), CHRONO, "Marie", member()),
            second.sign_up(GameId(1), CHRONO, "Paul", Registrant::Member(UserId::new(7))),
        );
        a.unwrap();
        b.unwrap();

        let mut volunteers = store.volunteers(GameId(1), CHRONO);
        volunteers.sort();
        assert_eq!(volunteers, vec!["Marie", "Paul"]);
        assert!(store.conflicts() >= 1);
    }

    #[test_log::test(tokio::test)]
    async fn strict_capacity_rejects_the_loser_of_a_race() {
        let store = Arc::new(MemoryStore::with_game().interleaving());
        let first = ledger(&store, true);
        let second = ledger(&store, true);

        let (a, b) = tokio::join!(
            first.sign_up(GameId(1), CHRONO, "Marie", member()),
            second.sign_up(GameId(1), CHRONO, "Paul", member()),
        );

        assert_eq!(
            [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count(),
            1,
            "exactly one sign-up wins"
        );
        assert!(matches!(
            a.err().or(b.err()),
            Some(LedgerError::RoleFull { .. })
        ));
        assert_eq!(store.volunteers(GameId(1), CHRONO).len(), 1);
        assert!(store.conflicts() >= 1);
    }

    #[test_log::test(tokio::test)]
    async fn soft_capacity_allows_overbooking() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);

        ledger
            .sign_up(GameId(1), CHRONO, "Marie, Paul", Registrant::Guest)
            .await
            .unwrap();

        assert_eq!(store.volunteers(GameId(1), CHRONO).len(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn missing_game_fails_fast() {
        let store = Arc::new(MemoryStore::with_game());

        let result = ledger(&store, false)
            .sign_up(GameId(99), BUVETTE, "Marie", member())
            .await;

        assert!(matches!(result, Err(LedgerError::GameNotFound(GameId(99)))));
        assert_eq!(store.loads(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn endless_conflicts_give_up() {
        let store = Arc::new(MemoryStore::with_game().always_conflicting());

        let result = ledger(&store, false)
            .sign_up(GameId(1), BUVETTE, "Marie", member())
            .await;

        assert!(matches!(result, Err(LedgerError::Contention(GameId(1)))));
        assert_eq!(store.conflicts(), super::MAX_ATTEMPTS);
        assert!(store.volunteers(GameId(1), BUVETTE).is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn withdraw_removes_the_first_match_and_its_registration() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie & Marie", member())
            .await
            .unwrap();

        assert!(ledger
            .withdraw(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap());

        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["Marie"]);
        assert_eq!(store.registrations().len(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn admin_withdraw_drops_the_members_registration() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap();

        assert!(ledger
            .withdraw(GameId(1), BUVETTE, "Marie", Registrant::Guest)
            .await
            .unwrap());

        assert!(store.volunteers(GameId(1), BUVETTE).is_empty());
        assert!(store.registrations().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn withdraw_prefers_the_callers_own_registration() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        let other = Registrant::Member(UserId::new(7));
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie", other)
            .await
            .unwrap();
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap();

        ledger
            .withdraw(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap();

        let registrations = store.registrations();
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].member, UserId::new(7));
    }

    #[test_log::test(tokio::test)]
    async fn rename_by_someone_else_follows_the_registration() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap();

        ledger
            .rename(GameId(1), BUVETTE, "Marie", "Maria", Registrant::Guest)
            .await
            .unwrap();

        let registrations = store.registrations();
        assert_eq!(registrations.len(), 1);
        assert_eq!(registrations[0].volunteer_name, "Maria");
        assert_eq!(registrations[0].member, UserId::new(42));
    }

    #[test_log::test(tokio::test)]
    async fn withdraw_absent_name_is_a_silent_no_op() {
        let store = Arc::new(MemoryStore::with_game());

        let removed = ledger(&store, false)
            .withdraw(GameId(1), BUVETTE, "Personne", member())
            .await
            .unwrap();

        assert!(!removed);
        assert_eq!(store.commits(), 0);
    }

    #[test_log::test(tokio::test)]
    async fn rename_to_same_name_changes_nothing() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "A", member())
            .await
            .unwrap();
        let registrations = store.registrations();
        let commits = store.commits();

        let outcome = ledger
            .rename(GameId(1), BUVETTE, "A", "A", member())
            .await
            .unwrap();

        assert_eq!(outcome, RenameOutcome::Unchanged);
        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["A"]);
        assert_eq!(store.registrations(), registrations);
        assert_eq!(store.commits(), commits);
    }

    #[test_log::test(tokio::test)]
    async fn rename_single_name_in_place() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie, Léo", member())
            .await
            .unwrap();

        let outcome = ledger
            .rename(GameId(1), BUVETTE, "Marie", "Maria", member())
            .await
            .unwrap();

        assert_eq!(outcome, RenameOutcome::Replaced);
        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["Maria", "Léo"]);
        assert!(store
            .registrations()
            .iter()
            .any(|r| r.volunteer_name == "Maria"));
        assert!(store.last_writes().iter().all(|w| matches!(w, IndexWrite::Rename { .. })));
    }

    #[test_log::test(tokio::test)]
    async fn splitting_rename_creates_independent_registrations() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        ledger
            .sign_up(GameId(1), BUVETTE, "Marie", member())
            .await
            .unwrap();
        let original = store.registrations()[0].id;

        let outcome = ledger
            .rename(GameId(1), BUVETTE, "Marie", "Marie et Paul", member())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            RenameOutcome::Split(vec!["Marie".to_string(), "Paul".to_string()])
        );
        assert_eq!(store.volunteers(GameId(1), BUVETTE), vec!["Marie", "Paul"]);

        let registrations = store.registrations();
        assert_eq!(registrations.len(), 2);
        assert!(registrations.iter().all(|r| r.id != original));
        assert_ne!(registrations[0].id, registrations[1].id);
    }

    #[test_log::test(tokio::test)]
    async fn rename_unknown_name_is_not_found() {
        let store = Arc::new(MemoryStore::with_game());

        let result = ledger(&store, false)
            .rename(GameId(1), BUVETTE, "Personne", "Quelqu'un", member())
            .await;

        assert!(matches!(result, Err(LedgerError::VolunteerNotFound(_))));
    }

    #[test_log::test(tokio::test)]
    async fn unknown_role_is_not_found() {
        let store = Arc::new(MemoryStore::with_game());

        let result = ledger(&store, false)
            .sign_up(GameId(1), RoleId(12), "Marie", member())
            .await;

        assert!(matches!(result, Err(LedgerError::RoleNotFound(RoleId(12)))));
    }

    #[test_log::test(tokio::test)]
    async fn set_capacity_to_unlimited() {
        let store = Arc::new(MemoryStore::with_game());

        ledger(&store, false)
            .set_capacity(GameId(1), CHRONO, Capacity::Unlimited)
            .await
            .unwrap();

        assert_eq!(
            store.game(GameId(1)).role(CHRONO).map(|r| r.capacity),
            Some(Capacity::Unlimited)
        );
    }

    #[test_log::test(tokio::test)]
    async fn only_the_owner_removes_a_carpool_entry() {
        let store = Arc::new(MemoryStore::with_game());
        let ledger = ledger(&store, false);
        let owner = UserId::new(5);

        let id = ledger
            .add_carpool(
                GameId(1),
                NewCarpoolEntry {
                    name: "Paul".to_string(),
                    owner: Some(owner),
                    kind: CarpoolKind::Driver,
                    phone: None,
                    seats: 3,
                    departure: Some("Gymnase".to_string()),
                },
            )
            .await
            .unwrap();

        let result = ledger
            .remove_carpool(GameId(1), &id, Some((UserId::new(6), "Marie")))
            .await;
        assert!(matches!(result, Err(LedgerError::NotOwner(_))));

        ledger
            .remove_carpool(GameId(1), &id, Some((owner, "Paul")))
            .await
            .unwrap();
        assert!(store.game(GameId(1)).carpool.is_empty());
    }
}
