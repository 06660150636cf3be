//! The fixed degree -> specialisation taxonomy.
//!
//! This is the static lookup table the classification engine validates
//! against. It is process-wide, read-only data; there is no admin surface
//! for editing it.

/// All degrees offered in the catalog.
pub const DEGREES: &[&str] = &[
    "Computer Science",
    "Biotechnology",
    "Electrical",
    "Civil",
    "ECE",
    "Automobile",
    "Mechanical",
];

/// Specialisations permitted under each degree.
///
/// Returns an empty slice for an unknown degree so callers can treat
/// "unknown degree" and "degree with no matching specialisation" uniformly.
pub fn specialisations(degree: &str) -> &'static [&'static str] {
    match degree {
        "Computer Science" => &[
            "Core",
            "Data Science",
            "Information Technology",
            "Artificial Intelligence",
            "Cloud Computing",
            "Cyber Security",
            "Computer Networking",
            "Gaming Technology",
            "Artificial Intelligence and Machine Learning",
            "Business Systems",
            "Big Data Analytics",
            "Block Chain Technology",
            "Software Engineering",
            "Internet of Things",
        ],
        "Biotechnology" => &[
            "Biotechnology Core",
            "Biotechnology (Computational Biology)",
            "Biotechnology W/S in Food Technology",
            "Biotechnology W/S in Genetic Engineering",
            "Biotechnology W/S in Regenerative Medicine",
        ],
        "Electrical" => &[
            "Electrical & Electronics Engineering",
            "Electric Vehicle Technology",
        ],
        "Civil" => &[
            "Civil Engineering Core",
            "Civil Engineering with Computer Applications",
        ],
        "ECE" => &[
            "ECE (Electronics and Communication Engineering)",
            "Electronics & Communication Engineering",
            "Cyber Physical Systems",
            "Data Sciences",
            "Electronics and Computer Engineering",
            "VLSI Design and Technology",
        ],
        "Automobile" => &["Core", "Automotive Electronics", "Vehicle Testing"],
        "Mechanical" => &[
            "Core",
            "Automation and Robotics",
            "AIML (Artificial Intelligence and Machine Learning)",
            "Mechatronics Engineering Core",
            "Autonomous Driving Technology",
            "Immersive Technologies",
            "Industrial IoT",
            "Robotics",
        ],
        _ => &[],
    }
}

/// Check whether a degree exists in the taxonomy.
pub fn is_known_degree(degree: &str) -> bool {
    DEGREES.contains(&degree)
}

/// Check whether a specialisation belongs to the given degree's entry.
pub fn is_valid_specialisation(degree: &str, specialisation: &str) -> bool {
    specialisations(degree).contains(&specialisation)
}
