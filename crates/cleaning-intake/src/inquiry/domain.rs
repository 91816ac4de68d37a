/// Fixed option set collected by the form, keyed by its wire value.
pub trait FormChoice: Copy + Default + 'static {
    /// Lower-case noun used in validation messages ("property type").
    const NOUN: &'static str;

    fn ordered() -> &'static [Self];
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .iter()
            .copied()
            .find(|choice| choice.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    #[default]
    SingleFamily,
    TownhouseCondo,
    Apartment,
    Commercial,
}

impl FormChoice for PropertyType {
    const NOUN: &'static str = "property type";

    fn ordered() -> &'static [Self] {
        &[
            Self::SingleFamily,
            Self::TownhouseCondo,
            Self::Apartment,
            Self::Commercial,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Self::SingleFamily => "single_family",
            Self::TownhouseCondo => "townhouse_condo",
            Self::Apartment => "apartment",
            Self::Commercial => "commercial",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SingleFamily => "Single Family",
            Self::TownhouseCondo => "Townhouse / Condo",
            Self::Apartment => "Apartment",
            Self::Commercial => "Commercial",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CleaningType {
    #[default]
    Standard,
    Deep,
    MoveInOut,
    PostConstruction,
    SpecializedRoughFinal,
}

impl FormChoice for CleaningType {
    const NOUN: &'static str = "cleaning type";

    fn ordered() -> &'static [Self] {
        &[
            Self::Standard,
            Self::Deep,
            Self::MoveInOut,
            Self::PostConstruction,
            Self::SpecializedRoughFinal,
        ]
    }

    fn key(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deep => "deep",
            Self::MoveInOut => "move_in_out",
            Self::PostConstruction => "post_construction",
            Self::SpecializedRoughFinal => "specialized_rough_final",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard Cleaning",
            Self::Deep => "Deep Cleaning",
            Self::MoveInOut => "Move-In / Move-Out",
            Self::PostConstruction => "Post Construction",
            Self::SpecializedRoughFinal => "Specialized Rough or Final Clean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HomeCondition {
    #[default]
    Level1,
    Level2,
    Level3,
    Level4,
}

impl FormChoice for HomeCondition {
    const NOUN: &'static str = "home condition";

    fn ordered() -> &'static [Self] {
        &[Self::Level1, Self::Level2, Self::Level3, Self::Level4]
    }

    fn key(self) -> &'static str {
        match self {
            Self::Level1 => "level_1",
            Self::Level2 => "level_2",
            Self::Level3 => "level_3",
            Self::Level4 => "level_4",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Level1 => "Level 1 - Light",
            Self::Level2 => "Level 2 - Moderate",
            Self::Level3 => "Level 3 - Heavy",
            Self::Level4 => "Level 4 - Very Heavy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PreferredTime {
    #[default]
    Morning,
    Afternoon,
}

impl FormChoice for PreferredTime {
    const NOUN: &'static str = "preferred time";

    fn ordered() -> &'static [Self] {
        &[Self::Morning, Self::Afternoon]
    }

    fn key(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning (8am-12pm)",
            Self::Afternoon => "Afternoon (12pm-4pm)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecurringBasis {
    #[default]
    OneTime,
    Weekly,
    BiWeekly,
    Monthly,
}

impl FormChoice for RecurringBasis {
    const NOUN: &'static str = "recurring basis";

    fn ordered() -> &'static [Self] {
        &[Self::OneTime, Self::Weekly, Self::BiWeekly, Self::Monthly]
    }

    fn key(self) -> &'static str {
        match self {
            Self::OneTime => "one_time",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi_weekly",
            Self::Monthly => "monthly",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::OneTime => "One-Time",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContactPreference {
    Text,
    Call,
    Email,
    #[default]
    NoPreference,
}

impl FormChoice for ContactPreference {
    const NOUN: &'static str = "contact preference";

    fn ordered() -> &'static [Self] {
        &[Self::Text, Self::Call, Self::Email, Self::NoPreference]
    }

    fn key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Call => "call",
            Self::Email => "email",
            Self::NoPreference => "no_preference",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Call => "Call",
            Self::Email => "Email",
            Self::NoPreference => "No Preference",
        }
    }
}

/// Optional supplementary services offered on the add-on step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOn {
    InteriorOven,
    InteriorFridge,
    Dishes,
    InteriorWindows,
    Baseboards,
    WallSpotCleaning,
    PatioBalcony,
    PetHairRemoval,
}

impl AddOn {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::InteriorOven,
            Self::InteriorFridge,
            Self::Dishes,
            Self::InteriorWindows,
            Self::Baseboards,
            Self::WallSpotCleaning,
            Self::PatioBalcony,
            Self::PetHairRemoval,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::InteriorOven => "interiorOven",
            Self::InteriorFridge => "interiorFridge",
            Self::Dishes => "dishes",
            Self::InteriorWindows => "interiorWindows",
            Self::Baseboards => "baseboards",
            Self::WallSpotCleaning => "wallSpotCleaning",
            Self::PatioBalcony => "patioBalcony",
            Self::PetHairRemoval => "petHairRemoval",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::InteriorOven => "Interior Oven",
            Self::InteriorFridge => "Interior Fridge",
            Self::Dishes => "Dishes",
            Self::InteriorWindows => "Interior Windows",
            Self::Baseboards => "Baseboards",
            Self::WallSpotCleaning => "Wall Spot Cleaning",
            Self::PatioBalcony => "Patio / Balcony",
            Self::PetHairRemoval => "Pet Hair Removal",
        }
    }
}

/// One flag per [`AddOn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AddOns {
    pub interior_oven: bool,
    pub interior_fridge: bool,
    pub dishes: bool,
    pub interior_windows: bool,
    pub baseboards: bool,
    pub wall_spot_cleaning: bool,
    pub patio_balcony: bool,
    pub pet_hair_removal: bool,
}

impl AddOns {
    pub fn is_selected(&self, add_on: AddOn) -> bool {
        match add_on {
            AddOn::InteriorOven => self.interior_oven,
            AddOn::InteriorFridge => self.interior_fridge,
            AddOn::Dishes => self.dishes,
            AddOn::InteriorWindows => self.interior_windows,
            AddOn::Baseboards => self.baseboards,
            AddOn::WallSpotCleaning => self.wall_spot_cleaning,
            AddOn::PatioBalcony => self.patio_balcony,
            AddOn::PetHairRemoval => self.pet_hair_removal,
        }
    }

    pub fn set(&mut self, add_on: AddOn, selected: bool) {
        let slot = match add_on {
            AddOn::InteriorOven => &mut self.interior_oven,
            AddOn::InteriorFridge => &mut self.interior_fridge,
            AddOn::Dishes => &mut self.dishes,
            AddOn::InteriorWindows => &mut self.interior_windows,
            AddOn::Baseboards => &mut self.baseboards,
            AddOn::WallSpotCleaning => &mut self.wall_spot_cleaning,
            AddOn::PatioBalcony => &mut self.patio_balcony,
            AddOn::PetHairRemoval => &mut self.pet_hair_removal,
        };
        *slot = selected;
    }

    /// Selected add-ons in display order.
    pub fn selected(&self) -> Vec<AddOn> {
        AddOn::ordered()
            .into_iter()
            .filter(|add_on| self.is_selected(*add_on))
            .collect()
    }
}

/// Residential quote request collected by the seven-step wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningInquiry {
    pub property_type: PropertyType,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub cleaning_type: CleaningType,
    pub home_condition: HomeCondition,
    pub clutter_level: u8,
    pub add_ons: AddOns,
    pub specific_requests: Option<String>,
    pub preferred_date: String,
    pub preferred_time: PreferredTime,
    pub has_pets: bool,
    pub recurring_basis: RecurringBasis,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub has_referral: bool,
    pub referral_name: Option<String>,
    pub preferred_contact: ContactPreference,
    pub newsletter_opt_in: bool,
    pub privacy_policy_agreed: bool,
}

/// Free-form inquiry from a business prospect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommercialInquiry {
    pub first_name: String,
    pub last_name: String,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_resolve_by_wire_key() {
        assert_eq!(
            CleaningType::from_key("specialized_rough_final"),
            Some(CleaningType::SpecializedRoughFinal)
        );
        assert_eq!(PropertyType::from_key("Single_Family"), None);
        assert_eq!(
            ContactPreference::from_key("no_preference"),
            Some(ContactPreference::NoPreference)
        );
    }

    #[test]
    fn every_cleaning_type_has_a_label() {
        for choice in CleaningType::ordered() {
            assert!(!choice.label().is_empty(), "{:?} needs a label", choice);
        }
    }

    #[test]
    fn selected_add_ons_follow_display_order() {
        let mut add_ons = AddOns::default();
        add_ons.set(AddOn::PetHairRemoval, true);
        add_ons.set(AddOn::InteriorOven, true);

        assert_eq!(
            add_ons.selected(),
            vec![AddOn::InteriorOven, AddOn::PetHairRemoval]
        );
        assert!(AddOns::default().selected().is_empty());
    }
}
