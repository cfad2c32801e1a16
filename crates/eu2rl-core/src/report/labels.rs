//! Axis metadata attached to an RL matrix

use serde::Serialize;

use crate::reflection::RlTable;

/// Long name, unit and extent of one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabel {
    pub long_name: String,
    pub unit: String,
    pub from: f64,
    pub to: f64,
}

impl AxisLabel {
    fn new(long_name: &str, unit: &str, from: f64, to: f64) -> Self {
        Self {
            long_name: long_name.to_string(),
            unit: unit.to_string(),
            from,
            to,
        }
    }
}

/// Labels for a frequency x thickness RL matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableLabels {
    /// Frequency axis, GHz
    pub x: AxisLabel,
    /// Thickness axis, mm
    pub y: AxisLabel,
    pub value_name: String,
    pub value_unit: String,
}

impl TableLabels {
    /// Labels spanning the first to last frequency and thickness of `table`
    pub fn for_table(table: &RlTable) -> Self {
        let f = table.frequency_ghz();
        let d = table.thickness_mm();
        Self {
            x: AxisLabel::new(
                "Frequency",
                "GHz",
                f.first().copied().unwrap_or(0.0),
                f.last().copied().unwrap_or(0.0),
            ),
            y: AxisLabel::new(
                "Thickness",
                "mm",
                d.first().copied().unwrap_or(0.0),
                d.last().copied().unwrap_or(0.0),
            ),
            value_name: "Reflection Loss".to_string(),
            value_unit: "dB".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_labels_follow_axis_order() {
        let table = RlTable::from_parts(
            Array2::zeros((3, 2)),
            vec![2.0, 10.0, 18.0],
            vec![5.0, 1.5],
        )
        .unwrap();
        let labels = TableLabels::for_table(&table);
        assert_eq!((labels.x.from, labels.x.to), (2.0, 18.0));
        assert_eq!((labels.y.from, labels.y.to), (5.0, 1.5));
        assert_eq!(labels.x.unit, "GHz");
        assert_eq!(labels.y.long_name, "Thickness");
        assert_eq!(labels.value_unit, "dB");
    }
}
