use crate::error::TypeError;

choice_enum! {
    /// Herb species tracked by the system.
    ///
    /// The set is closed: geofence zones, batch id prefixes and dashboard
    /// filters are all keyed by these variants.
    Species, error = TypeError::InvalidSpecies {
        Ashwagandha => "Ashwagandha",
        Tulsi => "Tulsi",
        Brahmi => "Brahmi",
        Neem => "Neem",
    }
}

impl Species {
    /// First three letters of the name, uppercased (`ASH`, `TUL`, ...).
    pub fn id_prefix(&self) -> String {
        self.label().chars().take(3).collect::<String>().to_uppercase()
    }
}
