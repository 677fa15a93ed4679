use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use time::macros::date;

use crate::models::{Fixture, Game, GameId, NewGame, RegistrationId, RoleId, UserRegistration};

use super::{CommitOutcome, GameCommit, GameStore, IndexWrite, StoreError, VersionedGame};

/// In-memory store for ledger tests. Can yield between read and commit so two
/// operations interleave, or refuse every commit.
#[derive(Default)]
pub struct MemoryStore {
    games: Mutex<HashMap<GameId, (Game, i64)>>,
    registrations: Mutex<Vec<UserRegistration>>,
    last_writes: Mutex<Vec<IndexWrite>>,
    next_registration: AtomicUsize,
    interleave: AtomicBool,
    always_conflict: AtomicBool,
    loads: AtomicUsize,
    commits: AtomicUsize,
    conflicts: AtomicUsize,
}

impl MemoryStore {
    /// One home game, id 1, with the youth role template.
    pub fn with_game() -> MemoryStore {
        let store = MemoryStore::default();
        let new_game = NewGame::with_default_roles(Fixture {
            team: "U11 M1".to_string(),
            opponent: "ROYAT BC".to_string(),
            date_label: "Samedi 14 Décembre 2024".to_string(),
            date: Some(date!(2024 - 12 - 14)),
            time_label: "15H00".to_string(),
            location: "Maison des Sports".to_string(),
            is_home: true,
        });
        let game = Game {
            id: GameId(1),
            fixture: new_game.fixture,
            roles: new_game.roles,
            carpool: vec![],
        };
        store.games.lock().unwrap().insert(game.id, (game, 0));
        store
    }

    pub fn interleaving(self) -> MemoryStore {
        self.interleave.store(true, Ordering::SeqCst);
        self
    }

    pub fn always_conflicting(self) -> MemoryStore {
        self.always_conflict.store(true, Ordering::SeqCst);
        self
    }

    pub fn game(&self, id: GameId) -> Game {
        self.games.lock().unwrap()[&id].0.clone()
    }

    pub fn volunteers(&self, id: GameId, role: RoleId) -> Vec<String> {
        self.game(id)
            .role(role)
            .map(|role| role.volunteers.clone())
            .unwrap_or_default()
    }

    pub fn registrations(&self) -> Vec<UserRegistration> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn last_writes(&self) -> Vec<IndexWrite> {
        self.last_writes.lock().unwrap().clone()
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn commits(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn load_game(&self, id: GameId) -> Result<Option<VersionedGame>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);

        let game = self
            .games
            .lock()
            .unwrap()
            .get(&id)
            .map(|(game, version)| VersionedGame {
                game: game.clone(),
                version: *version,
            });

        if self.interleave.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }

        Ok(game)
    }

    async fn load_registrations(&self, game: GameId) -> Result<Vec<UserRegistration>, StoreError> {
        Ok(self
            .registrations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.game_id == game)
            .cloned()
            .collect())
    }

    async fn commit(&self, commit: GameCommit) -> Result<CommitOutcome, StoreError> {
        let mut games = self.games.lock().unwrap();
        let Some((game, version)) = games.get_mut(&commit.game.id) else {
            return Ok(CommitOutcome::Conflict);
        };

        if self.always_conflict.load(Ordering::SeqCst) || *version != commit.expected_version {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
            return Ok(CommitOutcome::Conflict);
        }

        *game = commit.game;
        *version += 1;

        let mut registrations = self.registrations.lock().unwrap();
        for write in &commit.index_writes {
            match write {
                IndexWrite::Insert(new) => {
                    let id = self.next_registration.fetch_add(1, Ordering::SeqCst) as u64 + 1;
                    registrations.push(UserRegistration {
                        id: RegistrationId(id),
                        member: new.member,
                        game_id: new.game_id,
                        role_id: new.role_id,
                        role_name: new.role_name.clone(),
                        volunteer_name: new.volunteer_name.clone(),
                        game_date_label: new.game_date_label.clone(),
                        game_date: new.game_date,
                        game_time: new.game_time.clone(),
                        location: new.location.clone(),
                        team: new.team.clone(),
                        opponent: new.opponent.clone(),
                        created_at: new.created_at,
                    });
                }
                IndexWrite::Delete(id) => registrations.retain(|r| r.id != *id),
                IndexWrite::Rename { id, volunteer_name } => {
                    if let Some(registration) = registrations.iter_mut().find(|r| r.id == *id) {
                        registration.volunteer_name = volunteer_name.clone();
                    }
                }
            }
        }

        *self.last_writes.lock().unwrap() = commit.index_writes;
        self.commits.fetch_add(1, Ordering::SeqCst);

        Ok(CommitOutcome::Committed)
    }
}
