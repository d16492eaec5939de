pub mod amniotic_fluid;
pub mod bishop;
pub mod doppler;
pub mod femur_length;
pub mod fetal_growth;
pub mod fetal_weight;
pub mod gestational_age;
pub mod mefi;
pub mod nasal_bone;
pub mod preeclampsia;
pub mod preterm_birth;
pub mod t21_age;
pub mod t21_first;
pub mod t21_second;
