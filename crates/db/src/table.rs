use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum Meal {
    Table,
    Id,
    Data,
}

#[derive(Iden, Clone)]
pub enum Side {
    Table,
    Id,
    Data,
}

#[derive(Iden, Clone)]
pub enum Ingredient {
    Table,
    OwnerKind,
    OwnerId,
    Position,
    Data,
}

#[derive(Iden, Clone)]
pub enum DeliveryRule {
    Table,
    Id,
    Data,
}

#[derive(Iden, Clone)]
pub enum ScheduledSlot {
    Table,
    Id,
    Date,
    MealTime,
    Data,
}
