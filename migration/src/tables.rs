use entity::{Employees, Positions};
use sea_orm::sea_query::{Alias, ColumnDef, Expr, ForeignKey, Table, TableCreateStatement};

pub fn positions_table() -> TableCreateStatement {
    Table::create()
        .table(Positions::Table)
        .if_not_exists()
        .col(ColumnDef::new(Positions::Id).integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new(Positions::Title).string_len(200).not_null().unique_key())
        .to_owned()
}

pub fn employees_table() -> TableCreateStatement {
    Table::create()
        .table(Employees::Table)
        .if_not_exists()
        .col(ColumnDef::new(Employees::Id).integer().not_null().auto_increment().primary_key())
        .col(ColumnDef::new(Employees::FirstName).string_len(200).not_null())
        .col(ColumnDef::new(Employees::LastName).string_len(200).not_null())
        .col(
            ColumnDef::new(Employees::Salary)
                .custom(Alias::new("NUMERIC"))
                .not_null()
                .check(Expr::col(Employees::Salary).gt(0)),
        )
        .col(ColumnDef::new(Employees::Position).integer().not_null())
        .col(ColumnDef::new(Employees::Email).string_len(200).not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_employees_position")
                .from(Employees::Table, Employees::Position)
                .to(Positions::Table, Positions::Id),
        )
        .to_owned()
}
