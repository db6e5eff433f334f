// Demo data for local development, loaded when CMS_SEED_SAMPLE_DATA is set.
//
// Writes go straight to the services; seeding runs before the server accepts requests
// and is not subject to access checks.

use anyhow::Context;
use chrono::NaiveDate;

use crate::modules::clients::core::client::Client;
use crate::modules::sample_persons::core::sample_person::SamplePerson;
use crate::modules::users::core::user::User;
use crate::shell::state::AppState;

pub async fn seed_sample_data(state: &AppState) -> anyhow::Result<()> {
    let users = [
        ("admin", "Emma Admin", "USER,ADMIN"),
        ("user", "John Normal", "USER"),
    ];
    for (username, name, roles) in users {
        let user = User {
            username: username.into(),
            name: name.into(),
            roles: roles.into(),
            ..User::default()
        };
        state
            .users
            .service()
            .update(user)
            .await
            .with_context(|| format!("seeding user {username}"))?;
    }

    let clients = [
        ("Amina", "Qureshi", "Accountant", "1988-04-17"),
        ("Bilal", "Khan", "Civil engineer", "1979-11-02"),
        ("Farah", "Siddiqui", "Teacher", "1993-06-21"),
        ("Hamza", "Malik", "Shopkeeper", "1985-01-30"),
        ("Sana", "Javed", "Pharmacist", "1990-09-12"),
    ];
    for (n, (first_name, last_name, occupation, born)) in clients.into_iter().enumerate() {
        let client = Client {
            first_name: first_name.into(),
            last_name: last_name.into(),
            occupation: occupation.into(),
            email: format!("{}.{}@example.com", first_name, last_name).to_lowercase(),
            phone: format!("+92 300 555 01{n:02}"),
            date_of_birth: NaiveDate::parse_from_str(born, "%Y-%m-%d").ok(),
            address: format!("{} Mall Road, Lahore", n + 1),
            ..Client::default()
        };
        state
            .clients
            .service()
            .update(client)
            .await
            .with_context(|| format!("seeding client {first_name} {last_name}"))?;
    }

    let people = [
        ("Eija", "Virtanen", "Engineer", "Worker", false),
        ("Lucas", "Moreau", "Designer", "Lead", true),
        ("Mei", "Tanaka", "Analyst", "Worker", false),
        ("Tomas", "Novak", "Manager", "Supervisor", true),
    ];
    for (first_name, last_name, occupation, role, important) in people {
        let person = SamplePerson {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: format!("{}.{}@example.com", first_name, last_name).to_lowercase(),
            occupation: occupation.into(),
            role: role.into(),
            important,
            ..SamplePerson::default()
        };
        state
            .sample_persons
            .service()
            .update(person)
            .await
            .with_context(|| format!("seeding sample person {first_name} {last_name}"))?;
    }

    tracing::info!("sample data seeded");
    Ok(())
}
