use busywork_interfaces::{Framework, MeasurementKind, MeasurementRecord, NewMeasurement};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Stored framework tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum FrameworkTag {
    #[sea_orm(string_value = "QUARKUS")]
    Quarkus,
    #[sea_orm(string_value = "MICRONAUT")]
    Micronaut,
    #[sea_orm(string_value = "SPRINGBOOT")]
    SpringBoot,
}

/// Stored measurement kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum KindTag {
    #[sea_orm(string_value = "CPU")]
    Cpu,
    #[sea_orm(string_value = "MEMORY")]
    Memory,
}

/// One completed simulation run
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "statistics")]
pub struct Model {
    /// Primary key, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i32,

    pub recorded_at: ChronoDateTimeUtc,

    pub framework: FrameworkTag,

    pub kind: KindTag,

    /// Magnitude of the run as a decimal string
    pub parameter: String,

    /// Wall-clock duration of the run
    pub elapsed_nanos: i64,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Framework> for FrameworkTag {
    fn from(framework: Framework) -> Self {
        match framework {
            Framework::Quarkus => FrameworkTag::Quarkus,
            Framework::Micronaut => FrameworkTag::Micronaut,
            Framework::SpringBoot => FrameworkTag::SpringBoot,
        }
    }
}

impl From<FrameworkTag> for Framework {
    fn from(tag: FrameworkTag) -> Self {
        match tag {
            FrameworkTag::Quarkus => Framework::Quarkus,
            FrameworkTag::Micronaut => Framework::Micronaut,
            FrameworkTag::SpringBoot => Framework::SpringBoot,
        }
    }
}

impl From<MeasurementKind> for KindTag {
    fn from(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Cpu => KindTag::Cpu,
            MeasurementKind::Memory => KindTag::Memory,
        }
    }
}

impl From<KindTag> for MeasurementKind {
    fn from(tag: KindTag) -> Self {
        match tag {
            KindTag::Cpu => MeasurementKind::Cpu,
            KindTag::Memory => MeasurementKind::Memory,
        }
    }
}

/// Nanoseconds as stored in the `elapsed_nanos` column, saturating at `i64::MAX`
pub fn elapsed_to_nanos(elapsed: Duration) -> i64 {
    i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
}

impl From<Model> for MeasurementRecord {
    fn from(model: Model) -> Self {
        MeasurementRecord {
            id: model.id,
            recorded_at: model.recorded_at,
            framework: model.framework.into(),
            kind: model.kind.into(),
            parameter: model.parameter,
            elapsed: Duration::from_nanos(model.elapsed_nanos.max(0) as u64),
            description: model.description,
        }
    }
}

impl From<NewMeasurement> for ActiveModel {
    fn from(measurement: NewMeasurement) -> Self {
        use sea_orm::Set;

        ActiveModel {
            recorded_at: Set(measurement.recorded_at),
            framework: Set(measurement.framework.into()),
            kind: Set(measurement.kind.into()),
            parameter: Set(measurement.parameter),
            elapsed_nanos: Set(elapsed_to_nanos(measurement.elapsed)),
            description: Set(measurement.description),
            ..Default::default()
        }
    }
}
