use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// One smoke-test step: a named HTTP call plus the marker its response must
/// carry to count as a success.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: String,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub marker: Marker,
    /// Echo the raw response body when this step fails. Only the create-meal
    /// steps ask for it.
    pub dump_body_on_failure: bool,
}

/// Top-level JSON field a response must carry, with its exact expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub field: &'static str,
    pub value: &'static str,
}

impl Marker {
    pub fn success() -> Self {
        Self {
            field: "status",
            value: "success",
        }
    }

    pub fn healthy() -> Self {
        Self {
            field: "status",
            value: "healthy",
        }
    }

    pub fn db_healthy() -> Self {
        Self {
            field: "database_status",
            value: "healthy",
        }
    }
}

/// The fixed scenario, in the exact order the runner executes it: health
/// checks, catalog setup, two battle cycles, then the leaderboard.
pub fn battle_scenario() -> Vec<Step> {
    let mut steps = vec![
        get("health check", "/health", Marker::healthy()),
        get("database check", "/db-check", Marker::db_healthy()),
        delete("clear meals", "/clear-meals"),
        create_meal("Burrito", "Mexican", 8.99, "LOW"),
        create_meal("Pizza", "Italian", 12.50, "MED"),
        create_meal("Sushi", "Japanese", 15.00, "HIGH"),
        create_meal("Pasta", "Italian", 10.00, "MED"),
        create_meal("Gyro", "Greek", 7.25, "LOW"),
        delete("delete meal 1", "/delete-meal/1"),
        get("get meal by id 2", "/get-meal-by-id/2", Marker::success()),
        get(
            "get meal by name Sushi",
            "/get-meal-by-name/Sushi",
            Marker::success(),
        ),
    ];

    steps.extend(battle_cycle("Pizza", "Sushi"));
    steps.extend(battle_cycle("Pasta", "Gyro"));
    steps.push(get("leaderboard", "/leaderboard", Marker::success()));

    steps
}

/// Prep two combatants, inspect them, fight, then clear the ring.
fn battle_cycle(first: &str, second: &str) -> Vec<Step> {
    vec![
        prep_combatant(first),
        prep_combatant(second),
        get("get combatants", "/get-combatants", Marker::success()),
        get("battle", "/battle", Marker::success()),
        post("clear combatants", "/clear-combatants", None),
    ]
}

/// Request body for `POST /create-meal`.
#[derive(Debug, Serialize)]
struct CreateMeal<'a> {
    meal: &'a str,
    cuisine: &'a str,
    price: f64,
    difficulty: &'a str,
}

/// Request body for `POST /prep-combatant`.
#[derive(Debug, Serialize)]
struct PrepCombatant<'a> {
    meal: &'a str,
}

fn create_meal(meal: &str, cuisine: &str, price: f64, difficulty: &str) -> Step {
    let body = serde_json::to_value(CreateMeal {
        meal,
        cuisine,
        price,
        difficulty,
    })
    .expect("serialize create-meal body");

    Step {
        name: format!("create meal {meal}"),
        method: Method::POST,
        path: "/create-meal".into(),
        body: Some(body),
        marker: Marker::success(),
        dump_body_on_failure: true,
    }
}

fn prep_combatant(meal: &str) -> Step {
    let body = serde_json::to_value(PrepCombatant { meal }).expect("serialize prep-combatant body");

    post(&format!("prep combatant {meal}"), "/prep-combatant", Some(body))
}

fn get(name: &str, path: &str, marker: Marker) -> Step {
    Step {
        name: name.into(),
        method: Method::GET,
        path: path.into(),
        body: None,
        marker,
        dump_body_on_failure: false,
    }
}

fn post(name: &str, path: &str, body: Option<Value>) -> Step {
    Step {
        name: name.into(),
        method: Method::POST,
        path: path.into(),
        body,
        marker: Marker::success(),
        dump_body_on_failure: false,
    }
}

fn delete(name: &str, path: &str) -> Step {
    Step {
        name: name.into(),
        method: Method::DELETE,
        path: path.into(),
        body: None,
        marker: Marker::success(),
        dump_body_on_failure: false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn prep_bodies_serialize_to_a_single_meal_field() {
        let step = prep_combatant("Pizza");
        assert_eq!(step.body.unwrap(), json!({ "meal": "Pizza" }));
    }

    #[test]
    fn runs_twenty_two_steps_in_declared_order() {
        let steps = battle_scenario();

        let calls: Vec<String> = steps
            .iter()
            .map(|s| format!("{} {}", s.method, s.path))
            .collect();

        let expected = [
            "GET /health",
            "GET /db-check",
            "DELETE /clear-meals",
            "POST /create-meal",
            "POST /create-meal",
            "POST /create-meal",
            "POST /create-meal",
            "POST /create-meal",
            "DELETE /delete-meal/1",
            "GET /get-meal-by-id/2",
            "GET /get-meal-by-name/Sushi",
            "POST /prep-combatant",
            "POST /prep-combatant",
            "GET /get-combatants",
            "GET /battle",
            "POST /clear-combatants",
            "POST /prep-combatant",
            "POST /prep-combatant",
            "GET /get-combatants",
            "GET /battle",
            "POST /clear-combatants",
            "GET /leaderboard",
        ];

        assert_eq!(steps.len(), 22);
        assert_eq!(calls, expected);
    }

    #[test]
    fn health_steps_use_their_own_markers() {
        let steps = battle_scenario();
        assert_eq!(steps[0].marker, Marker::healthy());
        assert_eq!(steps[1].marker, Marker::db_healthy());
        assert!(steps[2..].iter().all(|s| s.marker == Marker::success()));
    }

    #[test]
    fn create_meal_bodies_carry_all_four_fields() {
        let steps = battle_scenario();
        let burrito = steps.iter().find(|s| s.name == "create meal Burrito");
        let body = burrito.and_then(|s| s.body.clone()).unwrap();

        assert_eq!(body["meal"], "Burrito");
        assert_eq!(body["cuisine"], "Mexican");
        assert_eq!(body["price"], 8.99);
        assert_eq!(body["difficulty"], "LOW");
    }

    #[test]
    fn only_create_meal_steps_dump_the_body_on_failure() {
        for step in battle_scenario() {
            assert_eq!(step.dump_body_on_failure, step.path == "/create-meal");
        }
    }

    #[test]
    fn battle_cycles_prep_different_pairs() {
        let preps: Vec<Value> = battle_scenario()
            .into_iter()
            .filter(|s| s.path == "/prep-combatant")
            .filter_map(|s| s.body)
            .collect();

        let meals: Vec<&str> = preps.iter().filter_map(|b| b["meal"].as_str()).collect();
        assert_eq!(meals, ["Pizza", "Sushi", "Pasta", "Gyro"]);
    }
}
