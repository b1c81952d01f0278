use super::*;

#[test]
fn finds_skin_tokens_and_universal() {
    assert_eq!(
        VariantTag::find_in("tshirtwhite_skin1.png"),
        Some(VariantTag::Skin(1))
    );
    assert_eq!(
        VariantTag::find_in("skin3_rosy.png"),
        Some(VariantTag::Skin(3))
    );
    assert_eq!(
        VariantTag::find_in("hoodie_universal.png"),
        Some(VariantTag::Universal)
    );
    assert_eq!(VariantTag::find_in("blue.png"), None);
}

#[test]
fn skin10_is_not_skin1() {
    assert_eq!(
        VariantTag::find_in("jacket_skin10.png"),
        Some(VariantTag::Skin(10))
    );
    assert_eq!(VariantTag::find_in("skin10"), Some(VariantTag::Skin(10)));
}

#[test]
fn out_of_range_and_three_digit_tokens_are_rejected() {
    assert_eq!(VariantTag::find_in("body_skin0.png"), None);
    assert_eq!(VariantTag::find_in("body_skin11.png"), None);
    assert_eq!(VariantTag::find_in("body_skin123.png"), None);
    assert_eq!(
        VariantTag::find_in("skin11_then_skin2.png"),
        Some(VariantTag::Skin(2))
    );
}

#[test]
fn rejected_token_does_not_swallow_the_next_one() {
    assert_eq!(
        VariantTag::find_in("skin0skin3.png"),
        Some(VariantTag::Skin(3))
    );
    assert_eq!(
        VariantTag::find_in("skin123universal.png"),
        Some(VariantTag::Universal)
    );
    assert_eq!(
        VariantTag::replace_skin_token("skin0skin3.png", VariantTag::Skin(5)),
        "skin0skin5.png"
    );
}

#[test]
fn replace_swaps_only_the_skin_token() {
    assert_eq!(
        VariantTag::replace_skin_token("tshirtwhite_skin1.png", VariantTag::Skin(3)),
        "tshirtwhite_skin3.png"
    );
    assert_eq!(
        VariantTag::replace_skin_token("tshirtwhite_skin1.png", VariantTag::Skin(10)),
        "tshirtwhite_skin10.png"
    );
    assert_eq!(
        VariantTag::replace_skin_token("suit_skin10.png", VariantTag::Skin(2)),
        "suit_skin2.png"
    );
    assert_eq!(
        VariantTag::replace_skin_token("hoodie_universal.png", VariantTag::Skin(4)),
        "hoodie_universal.png"
    );
}

#[test]
fn display_and_parse_agree() {
    for tag in VariantTag::ALL {
        assert_eq!(tag.to_string().parse::<VariantTag>().unwrap(), tag);
    }
    assert!("skin0".parse::<VariantTag>().is_err());
    assert!("skin".parse::<VariantTag>().is_err());
    assert!(VariantTag::skin(11).is_none());
}
