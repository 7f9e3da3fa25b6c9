use crate::model::passenger::{Passenger, Pclass, Sex};

/// Survival statistics for one (class, sex) group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurvivalCell {
    pub passengers: u32,
    pub survivors: u32,
}

impl SurvivalCell {
    /// Mean of `survived` for the group; `None` when the group is empty.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        if self.passengers == 0 {
            None
        } else {
            Some(f64::from(self.survivors) / f64::from(self.passengers))
        }
    }
}

/// Survival rate pivot: classes as rows, sexes as columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurvivalTable {
    cells: [[SurvivalCell; 2]; 3],
}

impl SurvivalTable {
    #[must_use]
    pub fn from_rows(rows: &[Passenger]) -> Self {
        let mut table = Self::default();
        for row in rows {
            let cell = &mut table.cells[row.pclass.index()][row.sex.index()];
            cell.passengers = cell.passengers.saturating_add(1);
            if row.survived {
                cell.survivors = cell.survivors.saturating_add(1);
            }
        }
        table
    }

    #[must_use]
    pub fn cell(&self, pclass: Pclass, sex: Sex) -> SurvivalCell {
        self.cells[pclass.index()][sex.index()]
    }

    #[must_use]
    pub fn rate(&self, pclass: Pclass, sex: Sex) -> Option<f64> {
        self.cell(pclass, sex).rate()
    }

    /// Flattened `(class, sex, rate)` triples in class-then-sex order.
    pub fn iter_rates(&self) -> impl Iterator<Item = (Pclass, Sex, Option<f64>)> + '_ {
        Pclass::ALL.into_iter().flat_map(move |pclass| {
            Sex::ALL
                .into_iter()
                .map(move |sex| (pclass, sex, self.rate(pclass, sex)))
        })
    }
}
