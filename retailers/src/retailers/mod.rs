pub(crate) mod animates;
pub(crate) mod apple;
pub(crate) mod bargain_chemist;
pub(crate) mod chemist_warehouse;
pub(crate) mod farmers_beauty;
pub(crate) mod farmers_home;
pub(crate) mod harvey_norman;
pub(crate) mod heathcotes;
pub(crate) mod jb_hifi;
pub(crate) mod life_pharmacy;
pub(crate) mod mecca;
pub(crate) mod mighty_ape;
pub(crate) mod noel_leeming;
pub(crate) mod pb_tech;
pub(crate) mod pet_co_nz;
pub(crate) mod petdirect;
pub(crate) mod sephora;
pub(crate) mod supplements_co_nz;
pub(crate) mod the_warehouse;
