use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::{Catalog, Incident};

/// Shared handler state. The catalog is immutable; the picker RNG is the only
/// thing behind a lock and it is never held across an await.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    picker: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// `seed` makes `GET /incident` reproducible; `None` seeds from the OS.
    pub fn new(catalog: Catalog, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog: Arc::new(catalog),
            picker: Arc::new(Mutex::new(rng)),
        }
    }

    /// A copy of a randomly chosen catalog incident.
    pub fn pick_incident(&self) -> Option<Incident> {
        let mut rng = self.picker.lock().unwrap_or_else(PoisonError::into_inner);
        self.catalog.pick_incident(&mut *rng).cloned()
    }
}
