//! Shared fixtures for service unit tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use moments_core::config::{SharingConfig, UploadConfig};
use moments_core::types::{Clock, ManualClock, RouteId, UserId};
use moments_database::{FieldOp, MemoryStore, RouteFieldUpdate, RouteStore, UserStore};
use moments_entity::route::{Route, Waypoint};
use moments_entity::share::Collaborator;
use moments_entity::user::{AuthType, User};
use moments_storage::{CdnUrlBuilder, providers::DirectUploadSigner};

use crate::{
    BackgroundWrites, CollaboratorAdmission, PermissionResolver, PhotoUploadService, RouteService, ShareService,
    ShareTokenManager, StoreDeadline,
};

pub(crate) const CDN: &str = "https://cdn.test";

pub(crate) fn sample_route(id: &str, creator: &str) -> Route {
    Route {
        id: RouteId::from(id),
        name: "Coastal drive".into(),
        creator_id: UserId::from(creator),
        origin: Waypoint::default(),
        destination: Waypoint::default(),
        intermediate_waypoints: vec![],
        photos: vec![],
        created_at: 0,
        updated_at: 0,
        is_public: false,
        shared_with: vec![],
        share_token: None,
        share_token_expiry: None,
    }
}

pub(crate) struct Fixture {
    pub store: MemoryStore,
    pub clock: Arc<ManualClock>,
    pub background: BackgroundWrites,
    routes: Arc<dyn RouteStore>,
    users: Arc<dyn UserStore>,
    sharing: SharingConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap();
        Self {
            routes: Arc::new(store.clone()),
            users: Arc::new(store.clone()),
            store,
            clock: Arc::new(ManualClock::new(start)),
            background: BackgroundWrites::default(),
            sharing: SharingConfig::default(),
        }
    }

    fn clock_dyn(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn resolver(&self) -> PermissionResolver {
        PermissionResolver::new(self.routes.clone(), StoreDeadline::default())
    }

    pub fn tokens(&self) -> ShareTokenManager {
        ShareTokenManager::new(
            self.routes.clone(),
            self.resolver(),
            self.clock_dyn(),
            self.background.clone(),
            &self.sharing,
        )
    }

    pub fn admission(&self) -> CollaboratorAdmission {
        CollaboratorAdmission::new(
            self.routes.clone(),
            self.tokens(),
            self.clock_dyn(),
            StoreDeadline::default(),
            self.background.clone(),
        )
    }

    pub fn shares(&self) -> ShareService {
        ShareService::new(
            self.routes.clone(),
            self.users.clone(),
            self.resolver(),
            self.tokens(),
            self.admission(),
            StoreDeadline::default(),
        )
    }

    pub fn routes(&self) -> RouteService {
        RouteService::new(
            self.routes.clone(),
            self.resolver(),
            self.clock_dyn(),
            StoreDeadline::default(),
            self.background.clone(),
            CDN,
        )
    }

    pub fn uploads(&self) -> PhotoUploadService {
        let signer = DirectUploadSigner::new("http://uploads.test", CdnUrlBuilder::new(CDN));
        PhotoUploadService::new(
            self.routes.clone(),
            self.resolver(),
            Arc::new(signer),
            self.clock_dyn(),
            StoreDeadline::default(),
            &UploadConfig::default(),
        )
    }

    pub async fn route_owned_by(&self, creator: &str) -> Route {
        let route = sample_route(RouteId::generate().as_str(), creator);
        self.routes.create_route(&route).await.unwrap();
        route
    }

    pub async fn stored(&self, id: &RouteId) -> Route {
        self.routes.get_route(id).await.unwrap().unwrap()
    }

    pub async fn mint(&self, owner: &str, id: &RouteId, hours: Option<i64>) -> String {
        self.tokens()
            .mint(&UserId::from(owner), id, hours)
            .await
            .unwrap()
            .share_token
    }

    /// Write a collaborator entry directly, bypassing admission.
    pub async fn push_collaborator(&self, id: &RouteId, email: &str) {
        let mut shared_with = self.stored(id).await.shared_with;
        shared_with.push(Collaborator::upload(
            UserId::from(email),
            email,
            self.clock.now(),
        ));
        let update = RouteFieldUpdate {
            shared_with: FieldOp::Set(shared_with),
            updated_at: self.clock.now().timestamp_millis(),
            ..Default::default()
        };
        assert!(self.routes.update_route_fields(id, update).await.unwrap());
    }

    pub async fn add_user(&self, email: &str, first_name: &str) {
        let user = User {
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            google_id: None,
            auth_type: AuthType::Email,
        };
        self.users.upsert_user(&user).await.unwrap();
    }
}
