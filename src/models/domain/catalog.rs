/// Every subject label a quiz can be filed under. A student is enrolled in the
/// labels that start with their class label.
pub const SUBJECTS: &[&str] = &[
    "CLS6-TELUGU", "CLS6-HINDI", "CLS6-ENGLISH", "CLS6-MATHS", "CLS6-SCIENCE", "CLS6-SOCIAL",
    "CLS7-TELUGU", "CLS7-HINDI", "CLS7-ENGLISH", "CLS7-MATHS", "CLS7-SCIENCE", "CLS7-SOCIAL",
    "CLS8-TELUGU", "CLS8-HINDI", "CLS8-ENGLISH", "CLS8-MATHS", "CLS8-SCIENCE", "CLS8-SOCIAL",
    "CLS9-TELUGU", "CLS9-HINDI", "CLS9-ENGLISH", "CLS9-MATHS", "CLS9-SCIENCE", "CLS9-SOCIAL",
    "CLS10-TELUGU", "CLS10-HINDI", "CLS10-ENGLISH", "CLS10-MATHS", "CLS10-SCIENCE", "CLS10-SOCIAL",
    "CLS10-BRIDGE", "CLS10-POLYTECHNIC", "CLS10-FORMULAS",
    "CLS11-MPC-PHYSICS", "CLS11-MPC-MATHS1A", "CLS11-MPC-MATHS1B", "CLS11-MPC-CHEMISTRY",
    "CLS11-MPC-EAMCET", "CLS11-MPC-JEEMAINS", "CLS11-MPC-JEEADV",
    "CLS12-MPC-PHYSICS", "CLS12-MPC-MATHS2A", "CLS12-MPC-MATHS2B", "CLS12-MPC-CHEMISTRY",
    "CLS12-MPC-EAMCET", "CLS12-MPC-JEEMAINS", "CLS12-MPC-JEEADV",
    "CLS11-BIPC-PHYSICS", "CLS11-BIPC-BOTANY", "CLS11-BIPC-ZOOLOGY", "CLS11-BIPC-CHEMISTRY",
    "CLS11-BIPC-EAPCET", "CLS11-BIPC-NEET",
    "CLS12-BIPC-PHYSICS", "CLS12-BIPC-BOTANY", "CLS12-BIPC-ZOOLOGY", "CLS12-BIPC-CHEMISTRY",
    "CLS12-BIPC-EAPCET", "CLS12-BIPC-NEET",
];

const UPGRADES: &[(&str, &[&str])] = &[
    ("CLS6", &["CLS7"]),
    ("CLS7", &["CLS8"]),
    ("CLS8", &["CLS9"]),
    ("CLS9", &["CLS10"]),
    ("CLS10", &["CLS11-MPC", "CLS11-BIPC"]),
    ("CLS11-MPC", &["CLS12-MPC"]),
    ("CLS11-BIPC", &["CLS12-BIPC"]),
];

/// Subjects enrolled for a class, in catalog order. Plain prefix matching.
pub fn subjects_for_class(class: &str) -> Vec<&'static str> {
    SUBJECTS
        .iter()
        .copied()
        .filter(|subject| subject.starts_with(class))
        .collect()
}

pub fn upgradable_classes(class: &str) -> &'static [&'static str] {
    UPGRADES
        .iter()
        .find(|(from, _)| *from == class)
        .map(|(_, to)| *to)
        .unwrap_or(&[])
}

pub fn is_valid_upgrade(current: &str, next: &str) -> bool {
    upgradable_classes(current).contains(&next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subjects_follow_class_prefix() {
        let subjects = subjects_for_class("CLS11-MPC");
        assert_eq!(subjects.len(), 7);
        assert!(subjects.iter().all(|s| s.starts_with("CLS11-MPC-")));

        assert_eq!(subjects_for_class("CLS7").len(), 6);
        assert!(subjects_for_class("DEMO").is_empty());
    }

    #[test]
    fn upgrade_paths() {
        assert_eq!(upgradable_classes("CLS10"), &["CLS11-MPC", "CLS11-BIPC"]);
        assert!(upgradable_classes("CLS12-MPC").is_empty());

        assert!(is_valid_upgrade("CLS9", "CLS10"));
        assert!(is_valid_upgrade("CLS11-BIPC", "CLS12-BIPC"));
        assert!(!is_valid_upgrade("CLS9", "CLS11-MPC"));
        assert!(!is_valid_upgrade("CLS11-MPC", "CLS12-BIPC"));
    }
}
