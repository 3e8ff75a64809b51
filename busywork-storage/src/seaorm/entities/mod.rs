pub mod statistics;

pub use statistics::{
    ActiveModel as StatisticActiveModel, Column as StatisticColumn, Entity as Statistics, FrameworkTag, KindTag,
    Model as Statistic,
};
