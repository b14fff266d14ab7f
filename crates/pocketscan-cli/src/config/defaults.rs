pub struct DefaultsConfig {
    pub summary_file: String,
    pub residue_file: String,
    pub predictor: String,
    pub on_malformed: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            summary_file: "pockets_summary.csv".to_string(),
            residue_file: "residue_data.csv".to_string(),
            predictor: "fpocket".to_string(),
            on_malformed: "skip".to_string(),
        }
    }
}
