use latency_workshop_common::NewUser;

/// Users inserted on first start and on every reset.
pub fn initial_users() -> Vec<NewUser> {
    vec![NewUser {
        name: "Stan Schneider".to_string(),
        email: "stan_da_boss@rti.com".to_string(),
        role: "Da Boss".to_string(),
    }]
}
