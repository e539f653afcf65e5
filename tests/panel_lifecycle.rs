//! Panel lifecycle: the desaturation bracket, focus handlers, model
//! loads, and teardown through both `close` and `Drop`.

use specline::model::Model;
use specline::{Host, KeyEvent, Mode, Options, Rgba, SelectionPanel, Tag};

fn scene() -> Model {
    Model::builder()
        .molecule(1)
        .chain('A')
        .residue(42, "ALA")
        .atom("CA")
        .atom("CB")
        .residue(43, "GLY")
        .atom("CA")
        .build()
}

#[test]
fn open_flattens_everything_and_close_restores() {
    let mut model = scene();
    let atoms = model.atom_refs();
    model.set_color(atoms[0], Rgba::RED);
    let background = model.background();

    let panel = SelectionPanel::open(&mut model, Options::new(Mode::Residues));
    let neutral = panel.engine().options().neutral;
    for &atom in &atoms {
        assert_eq!(panel.engine().host().color_of(atom), neutral);
    }
    assert_eq!(panel.engine().host().background(), neutral);
    panel.close();

    assert_eq!(model.color_of(atoms[0]), Rgba::RED);
    assert_eq!(model.background(), background);
}

#[test]
fn drop_restores_like_close() {
    let mut model = scene();
    let atoms = model.atom_refs();
    model.set_color(atoms[1], Rgba::RED);

    {
        let mut panel = SelectionPanel::open(&mut model, Options::new(Mode::Residues));
        panel.engine_mut().set_text(":42");
        panel.engine_mut().itemize();
        assert!(!panel.engine().depicted().is_empty());
    }

    assert_eq!(model.color_of(atoms[1]), Rgba::RED);
    assert!(model.selected_atoms().is_empty());
}

#[test]
fn typing_through_the_panel_depicts() {
    let mut model = scene();
    let mut panel = SelectionPanel::open(&mut model, Options::new(Mode::Residues));

    for c in ":42".chars() {
        assert!(panel.on_key(KeyEvent::char(c)));
    }

    assert_eq!(panel.engine().items().len(), 1);
    assert_eq!(panel.engine().items()[0].tag(), Tag::Color(0));
    assert_eq!(panel.engine().depicted().len(), 2);
    assert_eq!(
        panel.engine().host().current_selection(Mode::Residues).len(),
        1
    );
    panel.close();
}

#[test]
fn focus_cycle_restores_and_reflattens() {
    let mut model = scene();
    let atoms = model.atom_refs();
    model.set_color(atoms[0], Rgba::RED);

    let options = Options::new(Mode::Residues).with_respond_to_focus(true);
    let mut panel = SelectionPanel::open(&mut model, options);
    let neutral = panel.engine().options().neutral;

    panel.on_focus_out();
    assert_eq!(panel.engine().host().color_of(atoms[0]), Rgba::RED);

    panel.on_focus_in();
    assert_eq!(panel.engine().host().color_of(atoms[0]), neutral);
    panel.close();
}

#[test]
fn models_opened_extends_the_override_and_revalidates() {
    let mut model = scene();
    let mut panel = SelectionPanel::open(&mut model, Options::new(Mode::Molecules));
    let neutral = panel.engine().options().neutral;

    // "#2" cannot resolve yet
    panel.engine_mut().set_text("#2");
    panel.engine_mut().itemize();
    assert_eq!(panel.engine().items()[0].tag(), Tag::Wrong);

    // a second molecule arrives
    {
        let host = panel.engine_mut().host_mut();
        host.push_molecule(2);
        host.push_chain('A');
        host.push_residue(1, "GLY");
        host.push_atom("CA");
    }
    panel.on_models_opened();

    // revalidated and depicted; the new molecule was flattened by the
    // same pass before depiction
    assert_eq!(panel.engine().items()[0].tag(), Tag::Color(0));
    let depicted = panel.engine().depicted().to_vec();
    assert_eq!(depicted.len(), 1);
    let tag_color = panel
        .engine()
        .options()
        .palette
        .color_for(Tag::Color(0))
        .unwrap();
    assert_eq!(panel.engine().host().color_of(depicted[0]), tag_color);

    // the first molecule's atoms are still flat
    let old_atom = panel.engine().host().atom_refs()[0];
    assert_eq!(panel.engine().host().color_of(old_atom), neutral);
    panel.close();
}

#[test]
fn depicted_atoms_keep_their_tag_color_through_a_desaturation_pass() {
    let mut model = scene();
    let options = Options::new(Mode::Residues).with_respond_to_focus(true);
    let mut panel = SelectionPanel::open(&mut model, options);

    panel.engine_mut().set_text(":42");
    panel.engine_mut().itemize();
    let depicted = panel.engine().depicted().to_vec();
    let neutral = panel.engine().options().neutral;
    let tag_color = panel
        .engine()
        .options()
        .palette
        .color_for(Tag::Color(0))
        .unwrap();

    panel.on_focus_out();
    panel.on_focus_in();
    for &atom in &depicted {
        assert_eq!(panel.engine().host().color_of(atom), tag_color);
    }
    // everything else went back to flat
    let other = panel.engine().host().atom_refs()[2];
    assert_eq!(panel.engine().host().color_of(other), neutral);
    panel.close();
}
