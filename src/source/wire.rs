// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON shapes served by the NGO API and their conversion into
//! [`DomainRecord`]s.
//!
//! Field names follow the API verbatim (a mix of Portuguese camelCase and
//! snake_case). Unknown fields are ignored and every field the reports do
//! not strictly need is optional, so a sloppy row degrades instead of
//! failing the whole list.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::records::{DomainRecord, RecordKind, parse_date};

/// `GET /animals` row.
#[derive(Debug, Clone, Deserialize)]
pub struct Animal {
    pub id_animal: Option<i64>,
    pub especie: Option<String>,
    pub status: Option<String>,
}

impl Animal {
    pub fn is_available(&self) -> bool {
        self.status.as_deref() == Some("disponivel")
    }
}

/// `GET /adoptions` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adoption {
    pub id: Option<i64>,
    pub animal_id: Option<i64>,
    pub data_adocao: Option<String>,
    pub status: Option<String>,
}

impl Adoption {
    /// Only approved adoptions are reported; pending and rejected
    /// applications never placed an animal.
    pub fn is_approved(&self) -> bool {
        self.status.as_deref() == Some("aprovada")
    }
}

/// `GET /donations` row.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: Option<i64>,
    #[serde(default)]
    pub tipo: Option<DonationType>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub valor: Option<f64>,
    #[serde(default)]
    pub itens: Option<Vec<DonationItem>>,
    pub data: Option<String>,
}

impl Donation {
    /// Rows without a type are treated like an unrecognised one.
    pub fn kind(&self) -> DonationType {
        self.tipo.unwrap_or(DonationType::Unknown)
    }

    pub fn lines(&self) -> &[DonationItem] {
        self.itens.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DonationType {
    #[serde(rename = "financeira")]
    Monetary,
    #[serde(rename = "item")]
    Item,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DonationItem {
    pub nome: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantidade: Option<f64>,
}

impl DonationItem {
    /// Whole units donated. Fractional quantities (kilos of food) round to
    /// the nearest unit; negative or out-of-range values read as missing.
    pub fn units(&self) -> Option<u32> {
        self.quantidade
            .filter(|q| (0.0..=f64::from(u32::MAX)).contains(q))
            .map(|q| q.round() as u32)
    }
}

/// Accept a JSON number or a numeric string. Anything else, including
/// non-finite values, reads as missing instead of failing the row.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// True when `raw` parses and falls in `year`. Unparseable timestamps are
/// logged and rejected since they cannot be attributed to any year.
fn in_year(raw: Option<&str>, year: i32, what: &str, id: Option<i64>) -> bool {
    match raw.and_then(parse_date) {
        Some(date) => chrono::Datelike::year(&date) == year,
        None => {
            warn!(
                "Skipping {what} {} with unparseable date {:?}",
                id.map_or_else(|| "?".to_string(), |i| i.to_string()),
                raw
            );
            false
        }
    }
}

/// Approved adoptions dated in `year`, with species looked up from the
/// animal list.
pub fn adoption_records(adoptions: &[Adoption], animals: &[Animal], year: i32) -> Vec<DomainRecord> {
    let species_by_id: HashMap<i64, &str> = animals
        .iter()
        .filter_map(|a| Some((a.id_animal?, a.especie.as_deref()?)))
        .collect();

    let records: Vec<DomainRecord> = adoptions
        .iter()
        .filter(|a| a.is_approved())
        .filter(|a| in_year(a.data_adocao.as_deref(), year, "adoption", a.id))
        .map(|a| {
            let species = a
                .animal_id
                .and_then(|id| species_by_id.get(&id).copied());
            if species.is_none() {
                debug!("Adoption {:?} has no known species", a.id);
            }
            DomainRecord {
                timestamp: a.data_adocao.clone(),
                kind: RecordKind::Adoption {
                    species: species.map(str::to_string),
                },
            }
        })
        .collect();

    debug!(
        "{} of {} adoptions counted for {year}",
        records.len(),
        adoptions.len()
    );
    records
}

/// Donations dated in `year`, flattened so each item line becomes its own
/// record.
pub fn donation_records(donations: &[Donation], year: i32) -> Vec<DomainRecord> {
    let mut records = Vec::new();

    for donation in donations {
        if !in_year(donation.data.as_deref(), year, "donation", donation.id) {
            continue;
        }

        match donation.kind() {
            DonationType::Monetary => {
                let amount = match donation.valor {
                    Some(v) if v < 0.0 => {
                        warn!(
                            "Donation {:?} has negative amount {v}, counting it as 0",
                            donation.id
                        );
                        None
                    }
                    other => other,
                };
                records.push(DomainRecord {
                    timestamp: donation.data.clone(),
                    kind: RecordKind::MonetaryDonation { amount },
                });
            }
            DonationType::Item if donation.lines().is_empty() => records.push(DomainRecord {
                timestamp: donation.data.clone(),
                kind: RecordKind::ItemDonation {
                    name: None,
                    quantity: None,
                },
            }),
            DonationType::Item => {
                records.extend(donation.lines().iter().map(|item| DomainRecord {
                    timestamp: donation.data.clone(),
                    kind: RecordKind::ItemDonation {
                        name: item.nome.clone(),
                        quantity: item.units(),
                    },
                }));
            }
            DonationType::Unknown => {
                warn!("Skipping donation {:?} with unknown type", donation.id);
            }
        }
    }

    records
}

/// Animals that were up for adoption during `year`: those still available
/// today plus those adopted in that year.
pub fn candidate_pool(animals: &[Animal], adoptions: &[Adoption], year: i32) -> u64 {
    let available = animals.iter().filter(|a| a.is_available()).count();
    let adopted = adoptions
        .iter()
        .filter(|a| a.is_approved())
        .filter(|a| {
            a.data_adocao
                .as_deref()
                .and_then(parse_date)
                .is_some_and(|d| chrono::Datelike::year(&d) == year)
        })
        .count();
    (available + adopted) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Vec<Animal> {
        serde_json::from_str(
            r#"[
                {"id_animal": 1, "nome": "Rex", "especie": "Cachorro", "status": "adotado"},
                {"id_animal": 2, "nome": "Mia", "especie": "Gato", "status": "adotado"},
                {"id_animal": 3, "nome": "Bob", "especie": "Cachorro", "status": "disponivel"},
                {"id_animal": 4, "nome": "Lua", "especie": "Gato", "status": "tratamento"},
                {"id_animal": 5, "nome": "Tom", "status": "disponivel"}
            ]"#,
        )
        .unwrap()
    }

    fn adoptions() -> Vec<Adoption> {
        serde_json::from_str(
            r#"[
                {"id": 10, "animalId": 1, "dataAdocao": "2024-01-15", "status": "aprovada",
                 "adotante": {"nome": "Ana"}},
                {"id": 11, "animalId": 2, "dataAdocao": "2024-03-02T12:00:00Z", "status": "aprovada"},
                {"id": 12, "animalId": 3, "dataAdocao": "2024-04-01", "status": "pendente"},
                {"id": 13, "animalId": 4, "dataAdocao": "2024-04-01", "status": "rejeitada"},
                {"id": 14, "animalId": 99, "dataAdocao": "2024-05-20", "status": "aprovada"},
                {"id": 15, "animalId": 1, "dataAdocao": "2023-12-31", "status": "aprovada"},
                {"id": 16, "animalId": 2, "dataAdocao": "ontem", "status": "aprovada"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn adoptions_join_species_and_filter() {
        let records = adoption_records(&adoptions(), &animals(), 2024);
        assert_eq!(records.len(), 3);

        let species: Vec<_> = records
            .iter()
            .map(|r| match &r.kind {
                RecordKind::Adoption { species } => species.clone(),
                other => panic!("unexpected record {other:?}"),
            })
            .collect();
        assert_eq!(
            species,
            vec![
                Some("Cachorro".to_string()),
                Some("Gato".to_string()),
                None
            ]
        );
    }

    #[test]
    fn adoptions_other_year() {
        let records = adoption_records(&adoptions(), &animals(), 2023);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp.as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn candidate_pool_counts_available_and_adopted() {
        // Animals 3 and 5 are available; adoptions 10, 11 and 14 were
        // approved in 2024.
        assert_eq!(candidate_pool(&animals(), &adoptions(), 2024), 5);
        assert_eq!(candidate_pool(&animals(), &adoptions(), 2023), 3);
        assert_eq!(candidate_pool(&[], &[], 2024), 0);
    }

    fn donations() -> Vec<Donation> {
        serde_json::from_str(
            r#"[
                {"id": 1, "tipo": "financeira", "valor": 100.5, "doadorNome": "Ana", "data": "2024-02-10"},
                {"id": 2, "tipo": "item", "doadorNome": "Beto", "data": "2024-02-14",
                 "itens": [{"nome": "Ração", "quantidade": 5, "unidade": "kg"},
                           {"nome": "Areia", "quantidade": 2}]},
                {"id": 3, "tipo": "item", "doadorNome": "Caio", "data": "2024-06-01"},
                {"id": 4, "tipo": "financeira", "doadorNome": "Duda", "data": "2024-07-07"},
                {"id": 5, "tipo": "servico", "doadorNome": "Eva", "data": "2024-07-08"},
                {"id": 6, "tipo": "financeira", "valor": 999, "doadorNome": "Fabi", "data": "2022-01-01"},
                {"id": 7, "tipo": "financeira", "valor": 1, "doadorNome": "Gil"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn donations_flatten_item_lines() {
        let records = donation_records(&donations(), 2024);
        assert_eq!(records.len(), 5);

        assert_eq!(
            records[0].kind,
            RecordKind::MonetaryDonation {
                amount: Some(100.5)
            }
        );
        assert_eq!(
            records[1].kind,
            RecordKind::ItemDonation {
                name: Some("Ração".to_string()),
                quantity: Some(5)
            }
        );
        assert_eq!(
            records[2].kind,
            RecordKind::ItemDonation {
                name: Some("Areia".to_string()),
                quantity: Some(2)
            }
        );
        assert_eq!(
            records[3].kind,
            RecordKind::ItemDonation {
                name: None,
                quantity: None
            }
        );
        assert_eq!(records[4].kind, RecordKind::MonetaryDonation { amount: None });
    }

    #[test]
    fn donations_keep_their_date_on_every_line() {
        let records = donation_records(&donations(), 2024);
        assert_eq!(records[1].timestamp, records[2].timestamp);
        assert_eq!(records[1].month_index(), Some(1));
    }

    #[test]
    fn unknown_donation_type_parses() {
        let d: Donation =
            serde_json::from_str(r#"{"tipo": "servico", "data": "2024-01-01"}"#).unwrap();
        assert_eq!(d.kind(), DonationType::Unknown);
        assert!(d.lines().is_empty());
    }

    #[test]
    fn missing_or_null_type_is_unknown() {
        let rows: Vec<Donation> = serde_json::from_str(
            r#"[
                {"id": 1, "valor": 10, "data": "2024-01-01"},
                {"id": 2, "tipo": null, "valor": 10, "data": "2024-01-01"},
                {"id": 3, "tipo": "financeira", "valor": 10, "data": "2024-01-01"}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows[0].kind(), DonationType::Unknown);
        assert_eq!(rows[1].kind(), DonationType::Unknown);

        let records = donation_records(&rows, 2024);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, RecordKind::MonetaryDonation { amount: Some(10.0) });
    }

    #[test]
    fn null_itens_is_an_empty_item_donation() {
        let rows: Vec<Donation> = serde_json::from_str(
            r#"[{"id": 1, "tipo": "item", "itens": null, "data": "2024-05-01"}]"#,
        )
        .unwrap();
        assert!(rows[0].lines().is_empty());

        let records = donation_records(&rows, 2024);
        assert_eq!(
            records,
            vec![DomainRecord {
                timestamp: Some("2024-05-01".to_string()),
                kind: RecordKind::ItemDonation {
                    name: None,
                    quantity: None
                },
            }]
        );
    }

    #[test]
    fn quantities_decode_leniently() {
        let d: Donation = serde_json::from_str(
            r#"{"tipo": "item", "data": "2024-02-01", "itens": [
                {"nome": "Ração", "quantidade": 2.5, "unidade": "kg"},
                {"nome": "Areia", "quantidade": 1.2},
                {"nome": "Coleira", "quantidade": null},
                {"nome": "Tapete", "quantidade": -3},
                {"nome": "Brinquedo", "quantidade": "4"},
                {"nome": "Manta", "quantidade": "muitos"},
                {"nome": "Pote", "quantidade": [1]}
            ]}"#,
        )
        .unwrap();
        let units: Vec<_> = d.lines().iter().map(DonationItem::units).collect();
        assert_eq!(
            units,
            vec![Some(3), Some(1), None, None, Some(4), None, None]
        );
    }

    #[test]
    fn one_bad_row_keeps_the_rest() {
        let rows: Vec<Donation> = serde_json::from_str(
            r#"[
                {"id": 1, "tipo": "financeira", "valor": 100, "data": "2024-03-01"},
                {"id": 2, "tipo": "item", "data": "2024-03-02",
                 "itens": [{"nome": "Ração", "quantidade": 2.5}]},
                {"id": 3, "tipo": "item", "itens": null, "data": "2024-03-03"},
                {"id": 4, "data": "2024-03-04"},
                {"id": 5, "tipo": "financeira", "valor": "abc", "data": "2024-03-05"}
            ]"#,
        )
        .unwrap();
        let records = donation_records(&rows, 2024);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].kind, RecordKind::MonetaryDonation { amount: Some(100.0) });
        assert_eq!(records[3].kind, RecordKind::MonetaryDonation { amount: None });
    }

    #[test]
    fn negative_amount_is_carried_as_missing() {
        let rows: Vec<Donation> = serde_json::from_str(
            r#"[{"id": 1, "tipo": "financeira", "valor": -30, "data": "2024-01-01"}]"#,
        )
        .unwrap();
        let records = donation_records(&rows, 2024);
        assert_eq!(records[0].kind, RecordKind::MonetaryDonation { amount: None });

        let report = crate::aggregate::ReportAggregator::default().aggregate_donations(&records);
        assert_eq!(report.total_monetary, 0.0);
        assert!(report.impact_summary.starts_with("R$ 0.00"));
    }
}
