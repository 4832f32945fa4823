//! Demo household catalog used by `mealpick seed` and by the in-memory store.

use mealpick_db::Store;
use mealpick_shared::{
    MealTime, Result,
    catalog::{DeliveryRule, Difficulty, IngredientLine, MealItem, Owner, SideItem, Unit},
};
use validator::Validate;

#[derive(Debug, Default)]
pub struct SeedReport {
    pub meals: usize,
    pub sides: usize,
    pub ingredient_lines: usize,
    pub delivery_rules: usize,
}

struct DemoMeal {
    id: &'static str,
    code: &'static str,
    name: &'static str,
    difficulty: Difficulty,
    labels: &'static [&'static str],
    sides: &'static [&'static str],
    preference: &'static str,
    use_count: u32,
}

const MEALS: &[DemoMeal] = &[
    DemoMeal {
        id: "m1",
        code: "C01",
        name: "Enchiladas suizas",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &[],
        preference: "Julio",
        use_count: 0,
    },
    DemoMeal {
        id: "m2",
        code: "C02",
        name: "Enchiladas rojas",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &[],
        preference: "Julio",
        use_count: 1,
    },
    DemoMeal {
        id: "m3",
        code: "C03",
        name: "Pollo con salsa de champion",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &["s1", "s2", "s3"],
        preference: "Julio",
        use_count: 0,
    },
    DemoMeal {
        id: "m4",
        code: "C07",
        name: "Hamburguesas",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &[],
        preference: "Julio",
        use_count: 0,
    },
    DemoMeal {
        id: "m5",
        code: "C09",
        name: "Bulgogi",
        difficulty: Difficulty::Elaborate,
        labels: &["Comida"],
        sides: &["s1", "s2", "s3", "s8"],
        preference: "Julio; Ericka",
        use_count: 0,
    },
    DemoMeal {
        id: "m6",
        code: "C11",
        name: "Tacos de pescado",
        difficulty: Difficulty::Elaborate,
        labels: &["Comida"],
        sides: &[],
        preference: "Julio; Ericka",
        use_count: 0,
    },
    DemoMeal {
        id: "m7",
        code: "C21",
        name: "Pollo asado",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &["s1", "s2", "s3", "s8", "s9"],
        preference: "",
        use_count: 0,
    },
    DemoMeal {
        id: "m8",
        code: "C34",
        name: "Tacos de carne asada",
        difficulty: Difficulty::Delivery,
        labels: &["Comida", "Cena"],
        sides: &[],
        preference: "",
        use_count: 1,
    },
    DemoMeal {
        id: "m9",
        code: "C37",
        name: "Pizza",
        difficulty: Difficulty::Delivery,
        labels: &["Comida", "Cena"],
        sides: &[],
        preference: "",
        use_count: 1,
    },
    DemoMeal {
        id: "m10",
        code: "D01",
        name: "Huevo con jamon de pavo",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno"],
        sides: &["s4", "s5", "s6"],
        preference: "Julio; Ericka",
        use_count: 0,
    },
    DemoMeal {
        id: "m11",
        code: "D02",
        name: "Huevo chorizo",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno"],
        sides: &["s4", "s5", "s6"],
        preference: "Julio",
        use_count: 0,
    },
    DemoMeal {
        id: "m12",
        code: "D03",
        name: "Huevo con papa",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno"],
        sides: &["s4", "s5", "s6"],
        preference: "Julio",
        use_count: 0,
    },
    DemoMeal {
        id: "m13",
        code: "D04",
        name: "Omelette con champiñón, espinaca, queso",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno"],
        sides: &["s4", "s5", "s6"],
        preference: "Julio; Ericka",
        use_count: 0,
    },
    DemoMeal {
        id: "m14",
        code: "D08",
        name: "Yogur griego con toppings",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno", "Cena", "Comida"],
        sides: &[],
        preference: "Ericka",
        use_count: 2,
    },
    DemoMeal {
        id: "m15",
        code: "D09",
        name: "Huevo con tocino",
        difficulty: Difficulty::Simple,
        labels: &["Desayuno"],
        sides: &["s4", "s5", "s6"],
        preference: "",
        use_count: 2,
    },
    DemoMeal {
        id: "m16",
        code: "C32",
        name: "Quesadillas con jamon de pavo",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &[],
        preference: "",
        use_count: 3,
    },
    DemoMeal {
        id: "m17",
        code: "C38",
        name: "Spaghetti con pollo",
        difficulty: Difficulty::Simple,
        labels: &["Comida"],
        sides: &[],
        preference: "",
        use_count: 1,
    },
    DemoMeal {
        id: "m18",
        code: "C35",
        name: "Lentejas preparadas",
        difficulty: Difficulty::Simple,
        labels: &["Comida", "Cena"],
        sides: &[],
        preference: "",
        use_count: 0,
    },
];

const SIDES: &[(&str, &str, &str, &[&str], &str)] = &[
    ("s1", "S01", "Arroz", &["Comida"], "Julio; Ericka"),
    ("s2", "S02", "Ensalada", &["Comida"], "Julio; Ericka"),
    ("s3", "S03", "Pasta", &["Comida"], "Ericka"),
    ("s4", "S04", "Pan", &["Desayuno"], "Julio; Ericka"),
    ("s5", "S05", "Tortilla", &["Desayuno", "Comida"], "Julio; Ericka"),
    ("s6", "S06", "Quesadilla", &["Desayuno", "Comida"], "Julio"),
    ("s7", "S07", "Frijoles", &["Comida", "Cena"], "Julio; Ericka"),
    ("s8", "S08", "Verduras al vapor", &["Comida"], "Ericka"),
    ("s9", "S09", "Puré de papa", &["Comida"], "Julio; Ericka"),
    ("s10", "S10", "Camote al horno", &["Comida"], "Ericka"),
];

const MEAL_INGREDIENTS: &[(&str, &[(&str, Unit, f64)])] = &[
    (
        "m1",
        &[
            ("Pollo", Unit::Grams, 160.0),
            ("Tortillas", Unit::Piece, 4.0),
            ("Queso mozzarella", Unit::Grams, 60.0),
            ("Crema", Unit::Grams, 30.0),
            ("Salsa verde", Unit::Grams, 225.0),
        ],
    ),
    (
        "m2",
        &[
            ("Pollo", Unit::Grams, 150.0),
            ("Queso fresco", Unit::Grams, 30.0),
            ("Salsa roja", Unit::Grams, 225.0),
            ("Tortillas", Unit::Piece, 4.0),
        ],
    ),
    (
        "m10",
        &[("Huevo", Unit::Piece, 2.0), ("Jamón de pavo", Unit::Slice, 2.0)],
    ),
    (
        "m15",
        &[("Huevo", Unit::Piece, 2.0), ("Tocino", Unit::Strip, 2.0)],
    ),
];

const SIDE_INGREDIENTS: &[(&str, &[(&str, Unit, f64)])] = &[
    ("s1", &[("Arroz", Unit::Grams, 100.0)]),
    (
        "s2",
        &[
            ("Lechuga", Unit::Grams, 50.0),
            ("Tomate", Unit::Grams, 30.0),
            ("Pepino", Unit::Grams, 30.0),
        ],
    ),
    ("s3", &[("Pasta", Unit::Grams, 100.0)]),
    ("s4", &[("Pan", Unit::Piece, 2.0)]),
    ("s5", &[("Tortilla", Unit::Piece, 3.0)]),
    (
        "s6",
        &[
            ("Tortilla", Unit::Piece, 2.0),
            ("Queso mozzarella", Unit::Grams, 40.0),
        ],
    ),
    ("s7", &[("Frijoles", Unit::Grams, 150.0)]),
    ("s8", &[("Verduras", Unit::Grams, 150.0)]),
    ("s9", &[("Papa", Unit::Grams, 150.0)]),
    ("s10", &[("Camote", Unit::Grams, 150.0)]),
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn meals() -> Vec<MealItem> {
    MEALS
        .iter()
        .map(|meal| MealItem {
            id: meal.id.to_owned(),
            code: meal.code.to_owned(),
            name: meal.name.to_owned(),
            difficulty: meal.difficulty,
            labels: strings(meal.labels),
            side_ids: strings(meal.sides),
            use_count: meal.use_count,
            preference: meal.preference.to_owned(),
            ..Default::default()
        })
        .collect()
}

pub fn sides() -> Vec<SideItem> {
    SIDES
        .iter()
        .map(|&(id, code, name, labels, preference)| SideItem {
            id: id.to_owned(),
            code: code.to_owned(),
            name: name.to_owned(),
            labels: strings(labels),
            preference: preference.to_owned(),
        })
        .collect()
}

pub fn ingredient_lines() -> Vec<(Owner, Vec<IngredientLine>)> {
    let meals = MEAL_INGREDIENTS.iter().map(|(id, lines)| {
        let lines = lines
            .iter()
            .map(|&(name, unit, quantity)| IngredientLine::meal(*id, name, unit, quantity))
            .collect();
        (Owner::Meal(id.to_string()), lines)
    });
    let sides = SIDE_INGREDIENTS.iter().map(|(id, lines)| {
        let lines = lines
            .iter()
            .map(|&(name, unit, quantity)| IngredientLine::side(*id, name, unit, quantity))
            .collect();
        (Owner::Side(id.to_string()), lines)
    });

    meals.chain(sides).collect()
}

/// Saturday dinner is ordered in.
pub fn delivery_rules() -> Vec<DeliveryRule> {
    vec![DeliveryRule {
        id: "dr1".to_owned(),
        day_of_week: 6,
        meal_time: MealTime::Dinner,
        enabled: true,
    }]
}

/// Upserts the demo catalog. Running it twice leaves the same catalog.
#[tracing::instrument(skip(store))]
pub async fn seed(store: &dyn Store) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for meal in meals() {
        meal.validate()?;
        store.put_meal(&meal).await?;
        report.meals += 1;
    }

    for side in sides() {
        side.validate()?;
        store.put_side(&side).await?;
        report.sides += 1;
    }

    for (owner, lines) in ingredient_lines() {
        for line in &lines {
            line.validate()?;
        }
        store.replace_ingredient_lines(&owner, &lines).await?;
        report.ingredient_lines += lines.len();
    }

    for rule in delivery_rules() {
        rule.validate()?;
        store.put_delivery_rule(&rule).await?;
        report.delivery_rules += 1;
    }

    tracing::info!(
        meals = report.meals,
        sides = report.sides,
        ingredient_lines = report.ingredient_lines,
        delivery_rules = report.delivery_rules,
        "demo catalog seeded"
    );

    Ok(report)
}
