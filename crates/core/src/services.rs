//! Catalogue of medical services a registered hospital can declare.
//!
//! The catalogue is fixed data. Registration rejects service ids that are not listed here.

use serde::Serialize;
use CareLevel::{Basic, Critical, Moderate, Serious};

/// How acute the conditions a service treats are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CareLevel {
    Basic,
    Moderate,
    Serious,
    Critical,
}

impl CareLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareLevel::Basic => "basic",
            CareLevel::Moderate => "moderate",
            CareLevel::Serious => "serious",
            CareLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MedicalService {
    pub id: &'static str,
    pub name: &'static str,
    pub level: CareLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceCategory {
    pub category: &'static str,
    pub services: &'static [MedicalService],
}

const fn service(id: &'static str, name: &'static str, level: CareLevel) -> MedicalService {
    MedicalService { id, name, level }
}

pub static CATALOGUE: &[ServiceCategory] = &[
    ServiceCategory {
        category: "Basic Care & Common Conditions",
        services: &[
            service("general_consultation", "General Consultation", Basic),
            service("fever_treatment", "Fever & Flu Treatment", Basic),
            service("cold_cough", "Cold & Cough", Basic),
            service("viral_infections", "Viral Infections", Basic),
            service("headache_migraine", "Headache & Migraine", Basic),
            service("stomach_issues", "Stomach Issues (Gastritis, Acidity)", Basic),
            service("allergies", "Allergies & Skin Rashes", Basic),
            service("minor_injuries", "Minor Injuries & Wounds", Basic),
        ],
    },
    ServiceCategory {
        category: "Respiratory Care",
        services: &[
            service("asthma_treatment", "Asthma Treatment", Moderate),
            service("bronchitis", "Bronchitis", Moderate),
            service("pneumonia", "Pneumonia Treatment", Moderate),
            service("copd", "COPD (Chronic Obstructive Pulmonary Disease)", Moderate),
            service("tuberculosis", "Tuberculosis (TB) Care", Moderate),
            service("respiratory_distress", "Acute Respiratory Distress", Critical),
        ],
    },
    ServiceCategory {
        category: "Cardiovascular Care",
        services: &[
            service("hypertension", "Hypertension (High Blood Pressure)", Moderate),
            service("heart_disease", "Heart Disease Management", Serious),
            service("heart_attack", "Heart Attack (Myocardial Infarction)", Critical),
            service("stroke", "Stroke Treatment", Critical),
            service("cardiac_surgery", "Cardiac Surgery", Critical),
            service("angioplasty", "Angioplasty & Stenting", Critical),
            service("pacemaker", "Pacemaker Installation", Serious),
            service("ecg_monitoring", "ECG & Heart Monitoring", Moderate),
        ],
    },
    ServiceCategory {
        category: "Cancer & Oncology",
        services: &[
            service("cancer_screening", "Cancer Screening & Detection", Moderate),
            service("chemotherapy", "Chemotherapy", Serious),
            service("radiation_therapy", "Radiation Therapy", Serious),
            service("breast_cancer", "Breast Cancer Treatment", Serious),
            service("lung_cancer", "Lung Cancer Treatment", Serious),
            service("blood_cancer", "Blood Cancer (Leukemia) Treatment", Serious),
            service("tumor_surgery", "Tumor Removal Surgery", Serious),
            service("palliative_care", "Palliative & Hospice Care", Serious),
        ],
    },
    ServiceCategory {
        category: "Diabetes & Endocrine",
        services: &[
            service("diabetes_management", "Diabetes Management", Moderate),
            service("thyroid_treatment", "Thyroid Disorders", Moderate),
            service("diabetic_emergency", "Diabetic Emergency (Ketoacidosis)", Critical),
            service("insulin_therapy", "Insulin Therapy", Moderate),
            service("endocrine_disorders", "Endocrine Disorders", Moderate),
        ],
    },
    ServiceCategory {
        category: "Neurological Care",
        services: &[
            service("neurology_consult", "Neurological Consultation", Moderate),
            service("epilepsy", "Epilepsy & Seizure Management", Serious),
            service("parkinsons", "Parkinson's Disease", Serious),
            service("brain_surgery", "Brain Surgery (Neurosurgery)", Critical),
            service("spinal_surgery", "Spinal Surgery", Critical),
            service("head_trauma", "Head Trauma & Injury", Critical),
        ],
    },
    ServiceCategory {
        category: "Emergency & Trauma Care",
        services: &[
            service("emergency_24x7", "24/7 Emergency Services", Critical),
            service("trauma_care", "Trauma & Accident Care", Critical),
            service("burn_treatment", "Burn Treatment", Critical),
            service("poisoning", "Poisoning & Overdose", Critical),
            service("icu_critical_care", "ICU & Critical Care", Critical),
            service("ventilator_support", "Ventilator Support", Critical),
            service("emergency_surgery", "Emergency Surgery", Critical),
        ],
    },
    ServiceCategory {
        category: "Surgical Services",
        services: &[
            service("general_surgery", "General Surgery", Serious),
            service("laparoscopic", "Laparoscopic Surgery", Serious),
            service("orthopedic_surgery", "Orthopedic Surgery (Bone & Joints)", Serious),
            service("appendectomy", "Appendectomy", Serious),
            service("gallbladder_removal", "Gallbladder Removal", Serious),
            service("hernia_repair", "Hernia Repair", Moderate),
        ],
    },
    ServiceCategory {
        category: "Women's Health & Maternity",
        services: &[
            service("gynecology", "Gynecology Services", Moderate),
            service("obstetrics", "Obstetrics & Maternity Care", Moderate),
            service("normal_delivery", "Normal Delivery", Moderate),
            service("cesarean_section", "C-Section (Cesarean)", Serious),
            service("pregnancy_emergency", "Pregnancy Emergency Care", Critical),
            service("nicu", "NICU (Neonatal Intensive Care)", Critical),
            service("fertility_treatment", "Fertility Treatment", Moderate),
        ],
    },
    ServiceCategory {
        category: "Pediatric Care",
        services: &[
            service("pediatrics", "Pediatric Consultation", Basic),
            service("child_vaccination", "Child Vaccination", Basic),
            service("newborn_care", "Newborn Care", Moderate),
            service("child_nutrition", "Child Nutrition & Growth", Basic),
            service("pediatric_emergency", "Pediatric Emergency", Critical),
        ],
    },
    ServiceCategory {
        category: "Kidney & Urology",
        services: &[
            service("kidney_disease", "Kidney Disease Management", Serious),
            service("dialysis", "Dialysis (Hemodialysis)", Serious),
            service("kidney_transplant", "Kidney Transplant", Critical),
            service("kidney_stones", "Kidney Stone Treatment", Moderate),
            service("urology", "Urology Services", Moderate),
            service("uti_treatment", "Urinary Tract Infections", Basic),
        ],
    },
    ServiceCategory {
        category: "Liver & Gastroenterology",
        services: &[
            service("liver_disease", "Liver Disease Treatment", Serious),
            service("hepatitis", "Hepatitis Treatment", Serious),
            service("liver_transplant", "Liver Transplant", Critical),
            service("gastroenterology", "Gastroenterology Services", Moderate),
            service("endoscopy", "Endoscopy & Colonoscopy", Moderate),
            service("ibd", "IBD (Inflammatory Bowel Disease)", Moderate),
        ],
    },
    ServiceCategory {
        category: "Infectious Diseases",
        services: &[
            service("covid_treatment", "COVID-19 Treatment", Serious),
            service("dengue", "Dengue Fever Treatment", Serious),
            service("malaria", "Malaria Treatment", Moderate),
            service("hiv_aids", "HIV/AIDS Care", Serious),
            service("sepsis", "Sepsis & Severe Infections", Critical),
        ],
    },
    ServiceCategory {
        category: "Mental Health",
        services: &[
            service("psychiatry", "Psychiatry Services", Moderate),
            service("psychology", "Psychology & Counseling", Basic),
            service("depression_anxiety", "Depression & Anxiety Treatment", Moderate),
            service("addiction", "Addiction & De-addiction", Moderate),
            service("suicide_prevention", "Suicide Prevention & Crisis", Critical),
        ],
    },
    ServiceCategory {
        category: "Diagnostic Services",
        services: &[
            service("pathology", "Pathology & Lab Tests", Basic),
            service("radiology", "Radiology (X-Ray)", Basic),
            service("mri_ct_scan", "MRI & CT Scan", Moderate),
            service("ultrasound", "Ultrasound", Basic),
            service("blood_bank", "Blood Bank & Transfusion", Serious),
            service("biopsy", "Biopsy Services", Moderate),
        ],
    },
];

/// Every service, flattened in catalogue order.
pub fn all_services() -> impl Iterator<Item = &'static MedicalService> {
    CATALOGUE.iter().flat_map(|category| category.services.iter())
}

pub fn service_by_id(id: &str) -> Option<&'static MedicalService> {
    all_services().find(|service| service.id == id)
}

pub fn services_by_level(level: CareLevel) -> Vec<&'static MedicalService> {
    all_services().filter(|service| service.level == level).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_service_ids_are_unique() {
        let mut seen = HashSet::new();
        for service in all_services() {
            assert!(seen.insert(service.id), "duplicate service id {}", service.id);
        }
        assert_eq!(seen.len(), 94);
    }

    #[test]
    fn test_lookup_by_id() {
        let service = service_by_id("emergency_24x7").expect("known id");
        assert_eq!(service.name, "24/7 Emergency Services");
        assert_eq!(service.level, CareLevel::Critical);
        assert!(service_by_id("teleportation").is_none());
    }

    #[test]
    fn test_filter_by_level() {
        let basic = services_by_level(CareLevel::Basic);
        assert!(basic.iter().any(|s| s.id == "general_consultation"));
        assert!(basic.iter().all(|s| s.level == CareLevel::Basic));
    }
}
