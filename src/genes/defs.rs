#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneGroup {
    Hypoxia,
    Glycolysis,
    Immune,
}

#[derive(Debug, Clone, Copy)]
pub struct GeneGroupDef {
    pub id: &'static str,
    pub name: &'static str,
    pub group: GeneGroup,
    pub genes: &'static [&'static str],
}

pub const GENE_COUNT: usize = 11;

/// Submission order of the panel. Validation walks the genes in this order.
pub const GENE_SYMBOLS: [&str; GENE_COUNT] = [
    "HIF1A", "CA9", "VEGFA", "SLC2A1", "LDHA", "HK2", "PFKP", "PDK1", "CD274", "CTLA4", "TGFB1",
];

pub const PATIENT_ID_KEY: &str = "patient_id";

const HYPOXIA: &[&str] = &[
    "HIF1A", "CA9", "VEGFA", "SLC2A1", "LDHA", "HK2", "PFKP", "PDK1",
];
const GLYCOLYSIS: &[&str] = &["SLC2A1", "HK2", "PFKP", "PDK1", "LDHA"];
const IMMUNE: &[&str] = &["CD274", "CTLA4", "TGFB1"];

// Groups overlap; a gene may be listed under more than one signature.
const BUILTIN_GROUPS: &[GeneGroupDef] = &[
    GeneGroupDef {
        id: "hypoxia",
        name: "Hypoxia",
        group: GeneGroup::Hypoxia,
        genes: HYPOXIA,
    },
    GeneGroupDef {
        id: "glycolysis",
        name: "Glycolysis",
        group: GeneGroup::Glycolysis,
        genes: GLYCOLYSIS,
    },
    GeneGroupDef {
        id: "immune",
        name: "Immune",
        group: GeneGroup::Immune,
        genes: IMMUNE,
    },
];

pub fn builtin_groups() -> &'static [GeneGroupDef] {
    BUILTIN_GROUPS
}
