// SPDX-License-Identifier: GPL-3.0-or-later

//! Data access for reports.
//!
//! A [`RecordSource`] knows how to list the raw adoptions, animals and
//! donations the NGO has on file. The provided methods turn those lists into
//! year-scoped [`DomainRecord`]s, so backends only deal with transport.
//!
//! Two backends exist:
//!
//! - [`remote::RemoteApi`] talks to the NGO's HTTP API.
//! - [`snapshot::SnapshotFile`] reads a JSON export with the same shapes,
//!   for offline use and tests.

pub mod remote;
pub mod snapshot;
pub mod wire;

use std::path::PathBuf;

use thiserror::Error;

use crate::records::DomainRecord;
use wire::{Adoption, Animal, Donation};

/// Why a list could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("Could not decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Adoption records for one year together with the pool they are measured
/// against.
#[derive(Debug, Clone)]
pub struct AdoptionYear {
    pub records: Vec<DomainRecord>,
    pub candidate_pool: u64,
}

/// A place adoption and donation lists can be read from.
pub trait RecordSource {
    /// Short identifier used in log output.
    fn name(&self) -> &str;

    fn adoptions(&self) -> Result<Vec<Adoption>, FetchError>;

    fn animals(&self) -> Result<Vec<Animal>, FetchError>;

    fn donations(&self) -> Result<Vec<Donation>, FetchError>;

    /// Approved adoptions dated in `year`.
    fn fetch_adoptions_for_year(&self, year: i32) -> Result<Vec<DomainRecord>, FetchError> {
        Ok(self.fetch_adoption_year(year)?.records)
    }

    /// Donations dated in `year`, one record per item line.
    fn fetch_donations_for_year(&self, year: i32) -> Result<Vec<DomainRecord>, FetchError> {
        let donations = self.donations()?;
        Ok(wire::donation_records(&donations, year))
    }

    /// Animals available for adoption at some point in `year`.
    fn candidate_pool_size(&self, year: i32) -> Result<u64, FetchError> {
        Ok(self.fetch_adoption_year(year)?.candidate_pool)
    }

    /// Adoption records and candidate pool from a single read of each list.
    fn fetch_adoption_year(&self, year: i32) -> Result<AdoptionYear, FetchError> {
        let adoptions = self.adoptions()?;
        let animals = self.animals()?;
        Ok(AdoptionYear {
            records: wire::adoption_records(&adoptions, &animals, year),
            candidate_pool: wire::candidate_pool(&animals, &adoptions, year),
        })
    }
}
