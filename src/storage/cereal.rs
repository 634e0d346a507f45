use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cereal {
    Buckwheat,
    Rice,
    Millet,
    Peas,
    Bulgur,
}

impl Cereal {
    pub const ALL: [Cereal; 5] = [
        Cereal::Buckwheat,
        Cereal::Rice,
        Cereal::Millet,
        Cereal::Peas,
        Cereal::Bulgur,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cereal::Buckwheat => "BUCKWHEAT",
            Cereal::Rice => "RICE",
            Cereal::Millet => "MILLET",
            Cereal::Peas => "PEAS",
            Cereal::Bulgur => "BULGUR",
        }
    }
}

impl fmt::Display for Cereal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
