use super::{Condition, ConditionCategory, Sensation, Treatment, TreatmentCategory};

fn condition(
    id: &str,
    display_name: &str,
    category: ConditionCategory,
    group: Option<&str>,
) -> Condition {
    Condition {
        id: id.to_string(),
        display_name: display_name.to_string(),
        category,
        group: group.map(str::to_string),
    }
}

fn sensation(id: &str, display_name: &str, description: &str) -> Sensation {
    Sensation {
        id: id.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
    }
}

fn treatment(
    id: &str,
    display_name: &str,
    category: TreatmentCategory,
    what_it_addressed: &str,
) -> Treatment {
    Treatment {
        id: id.to_string(),
        display_name: display_name.to_string(),
        category,
        what_it_addressed: what_it_addressed.to_string(),
    }
}

pub(super) fn conditions() -> Vec<Condition> {
    use ConditionCategory::{NonTreatable, Treatable};

    vec![
        condition(
            "chronic-back-neck",
            "Chronic back and neck pain",
            Treatable,
            Some("Spine"),
        ),
        condition("sciatica", "Sciatica", Treatable, Some("Spine")),
        condition(
            "degenerative-disc",
            "Degenerative disc disease",
            Treatable,
            Some("Spine"),
        ),
        condition("knee-pain", "Knee pain", Treatable, Some("Joints")),
        condition("hip-pain", "Hip pain", Treatable, Some("Joints")),
        condition("shoulder-pain", "Shoulder pain", Treatable, Some("Joints")),
        condition("osteoarthritis", "Osteoarthritis", Treatable, Some("Joints")),
        condition(
            "peripheral-neuropathy",
            "Peripheral neuropathy",
            Treatable,
            Some("Nerves"),
        ),
        condition(
            "sports-injury",
            "Lingering sports injury",
            Treatable,
            Some("Soft tissue"),
        ),
        condition("tendonitis", "Chronic tendonitis", Treatable, Some("Soft tissue")),
        condition("fibromyalgia", "Fibromyalgia", NonTreatable, Some("Systemic")),
        condition(
            "chronic-migraine",
            "Chronic migraine",
            NonTreatable,
            Some("Systemic"),
        ),
        condition(
            "crps",
            "Complex regional pain syndrome",
            NonTreatable,
            Some("Systemic"),
        ),
    ]
}

pub(super) fn sensations() -> Vec<Sensation> {
    vec![
        sensation("aching", "Aching", "A dull, constant ache that lingers."),
        sensation("burning", "Burning", "Heat or burning along the affected area."),
        sensation("sharp", "Sharp", "Sudden, stabbing pain with certain movements."),
        sensation("throbbing", "Throbbing", "Pulsing pain that comes in waves."),
        sensation("tingling", "Tingling", "Pins and needles or a buzzing feeling."),
        sensation("numbness", "Numbness", "Reduced feeling or a dead sensation."),
        sensation("stiffness", "Stiffness", "Tightness that limits range of motion."),
        sensation("radiating", "Radiating", "Pain that travels into the arms or legs."),
    ]
}

pub(super) fn treatments() -> Vec<Treatment> {
    use TreatmentCategory::{Device, Medication, MindBody, Procedure, Therapy};

    vec![
        treatment(
            "otc-pain-relievers",
            "Over-the-counter pain relievers",
            Medication,
            "Dulled day-to-day pain signals",
        ),
        treatment(
            "prescription-medication",
            "Prescription pain medication",
            Medication,
            "Blocked severe pain signals",
        ),
        treatment(
            "muscle-relaxants",
            "Muscle relaxants",
            Medication,
            "Eased muscle spasms around the painful area",
        ),
        treatment(
            "cortisone-injections",
            "Cortisone injections",
            Procedure,
            "Calmed local inflammation",
        ),
        treatment(
            "nerve-blocks",
            "Nerve blocks",
            Procedure,
            "Interrupted pain signals from irritated nerves",
        ),
        treatment(
            "surgery",
            "Surgery",
            Procedure,
            "Repaired or removed damaged structures",
        ),
        treatment(
            "tens-unit",
            "TENS unit",
            Device,
            "Masked pain with electrical stimulation",
        ),
        treatment(
            "braces-supports",
            "Braces or supports",
            Device,
            "Stabilized the joint and limited painful movement",
        ),
        treatment(
            "physical-therapy",
            "Physical therapy",
            Therapy,
            "Strengthened surrounding muscles and restored mobility",
        ),
        treatment(
            "chiropractic",
            "Chiropractic care",
            Therapy,
            "Improved alignment and joint mechanics",
        ),
        treatment(
            "massage",
            "Massage therapy",
            Therapy,
            "Released muscle tension and improved circulation",
        ),
        treatment(
            "acupuncture",
            "Acupuncture",
            MindBody,
            "Reduced how intensely pain was perceived",
        ),
        treatment(
            "meditation-yoga",
            "Meditation or yoga",
            MindBody,
            "Built coping skills and lowered stress",
        ),
    ]
}
