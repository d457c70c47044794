mod strategy_selection;
