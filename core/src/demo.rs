//! Deterministic demo data — a coherent staffing data set from a seed.
//!
//! Same seed, same roster. All randomness flows through one Pcg64Mcg
//! stream seeded from the master seed; nothing here touches a platform
//! RNG. Used by staffing-runner and by tests that need a populated store.

use crate::calendar::week_start;
use crate::model::{Assignment, Holiday, Person, Project, NATIONAL_REGION};
use chrono::{Duration, NaiveDate};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct DemoRng {
    inner: Pcg64Mcg,
}

impl DemoRng {
    pub fn new(master_seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(master_seed),
        }
    }

    fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.next_u64_below(items.len() as u64) as usize]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoDataSet {
    pub persons: Vec<Person>,
    pub projects: Vec<Project>,
    pub holidays: Vec<Holiday>,
    pub assignments: Vec<Assignment>,
}

const REGIONS: &[&str] = &["MADRID", "BARCELONA", "VALENCIA", "SEVILLA"];

const FIRST_NAMES: &[&str] = &[
    "Ana", "Luis", "Marta", "Jorge", "Lucia", "Pablo", "Elena", "Sergio",
    "Carmen", "David", "Laura", "Javier", "Nuria", "Raul", "Ines", "Victor",
    "Sara", "Diego", "Paula", "Alberto", "Rocio", "Hugo", "Clara", "Ivan",
];

const LAST_NAMES: &[&str] = &[
    "Garcia", "Martinez", "Lopez", "Sanchez", "Perez", "Gomez", "Fernandez",
    "Ruiz", "Diaz", "Moreno", "Alvarez", "Romero", "Navarro", "Torres",
    "Dominguez", "Vazquez", "Ramos", "Gil", "Serrano", "Blanco", "Molina",
    "Castro", "Ortega", "Delgado",
];

/// (code, display name, classification) for the demo project portfolio.
const PROJECTS: &[(&str, &str, &str)] = &[
    ("WEB", "Portal Web Cliente", "CLIENTE"),
    ("CRM", "Integracion CRM", "CLIENTE"),
    ("DATA", "Plataforma de Datos", "CLIENTE"),
    ("PROD", "Producto Interno", "PRODUCTO"),
    ("OPS", "Soporte Operaciones", "SOPORTE"),
    ("PMO", "Gestion de Cartera", "GESTION"),
    ("LAB", "Laboratorio I+D", "OTROS"),
];

const PERCENTS: &[u32] = &[50, 75, 100];

/// Generate a demo data set: `people` staffed over `weeks` Monday-aligned
/// weeks starting from the week containing `from`. Assignments are
/// Monday–Friday blocks and never overlap for a person, so loading them
/// through the conflict gate produces no conflicts.
pub fn generate(master_seed: u64, people: usize, from: NaiveDate, weeks: u32) -> DemoDataSet {
    let mut rng = DemoRng::new(master_seed);
    let first_monday = week_start(from);

    let mut persons = Vec::with_capacity(people);
    for i in 0..people {
        let first = *rng.pick(FIRST_NAMES);
        let last = *rng.pick(LAST_NAMES);
        // First person per region acts as that region's squad lead.
        let region = REGIONS[i % REGIONS.len()];
        let squad_lead_id = if i < REGIONS.len() {
            None
        } else {
            Some(format!("p-{:03}", i % REGIONS.len() + 1))
        };
        persons.push(Person {
            person_id: format!("p-{:03}", i + 1),
            display_name: format!("{first} {last}"),
            region: region.to_string(),
            squad_lead_id,
        });
    }

    let projects: Vec<Project> = PROJECTS
        .iter()
        .map(|(code, name, classification)| Project {
            project_id: format!("prj-{}", code.to_ascii_lowercase()),
            code: (*code).to_string(),
            display_name: (*name).to_string(),
            classification: (*classification).to_string(),
        })
        .collect();

    let mut holidays = Vec::new();
    // One national holiday on the Tuesday of the second week.
    holidays.push(Holiday {
        date: first_monday + Duration::days(8),
        description: "Fiesta Nacional".to_string(),
        country: "ES".to_string(),
        region: NATIONAL_REGION.to_string(),
    });
    // One local holiday per region, spread over later weeks.
    for (i, region) in REGIONS.iter().enumerate() {
        let week = (i as i64 + 2) % i64::from(weeks.max(1));
        holidays.push(Holiday {
            date: first_monday + Duration::days(week * 7 + 3),
            description: format!("Fiesta Local {region}"),
            country: "ES".to_string(),
            region: (*region).to_string(),
        });
    }

    let mut assignments = Vec::new();
    for (pi, person) in persons.iter().enumerate() {
        for week in 0..i64::from(weeks) {
            // Leave some weeks unassigned so availability shows up.
            if !rng.chance(0.85) {
                continue;
            }
            let monday = first_monday + Duration::days(week * 7);
            let project = rng.pick(&projects);
            let percent = *rng.pick(PERCENTS);
            assignments.push(Assignment {
                assignment_id: format!("demo-{}-{:03}-w{:02}", master_seed, pi + 1, week),
                person_id: person.person_id.clone(),
                project_id: project.project_id.clone(),
                start_date: monday,
                end_date: monday + Duration::days(4),
                allocation_percent: percent,
                kind: "development".to_string(),
                notes: None,
            });
        }
    }

    DemoDataSet {
        persons,
        projects,
        holidays,
        assignments,
    }
}
